use async_trait::async_trait;
use twilight_model::{
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, UserMarker},
    },
    util::Timestamp,
};

use crate::model::{BulkDeleteOutcome, InteractionHandle, UnbanOutcome};
use crate::reply::Reply;

/// Outbound calls against the chat platform.
///
/// Each moderation method maps to exactly one platform action. Errors are
/// returned unchanged so the dispatcher can log and report them.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn ban(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> anyhow::Result<()>;

    /// Lift a ban. A missing ban is reported as [`UnbanOutcome::NotBanned`], not as an error.
    async fn unban(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<UnbanOutcome>;

    async fn kick(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> anyhow::Result<()>;

    /// Set or clear (`until = None`) a member's communication timeout.
    async fn set_timeout(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        until: Option<Timestamp>,
        reason: Option<&str>,
    ) -> anyhow::Result<()>;

    /// Delete up to `count` of the newest messages in a channel.
    async fn bulk_delete(
        &self,
        channel_id: Id<ChannelMarker>,
        count: u16,
    ) -> anyhow::Result<BulkDeleteOutcome>;

    async fn reply(&self, interaction: &InteractionHandle, reply: &Reply) -> anyhow::Result<()>;

    async fn delete_reply(&self, interaction: &InteractionHandle) -> anyhow::Result<()>;
}
