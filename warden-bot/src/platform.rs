use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use twilight_http::{
    Client,
    api_error::ApiError,
    error::{Error as HttpError, ErrorType},
    request::AuditLogReason as _,
};
use twilight_model::{
    channel::message::{AllowedMentions, MessageFlags},
    http::interaction::{InteractionResponse, InteractionResponseType},
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, UserMarker},
    },
    util::Timestamp,
};
use twilight_util::builder::InteractionResponseDataBuilder;

use warden_core::{
    Platform, Reply,
    model::{BulkDeleteOutcome, InteractionHandle, UnbanOutcome},
};
use warden_utils::{cleanup::partition_bulk_deletable, time::now_unix_secs};

/// Discord JSON error code for "Unknown Ban".
const UNKNOWN_BAN: u64 = 10026;

/// [`Platform`] backed by Discord's HTTP API.
pub struct TwilightPlatform {
    http: Arc<Client>,
}

impl TwilightPlatform {
    pub fn new(http: Arc<Client>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Platform for TwilightPlatform {
    async fn ban(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> anyhow::Result<()> {
        self.http.create_ban(guild_id, user_id).reason(reason).await?;

        Ok(())
    }

    async fn unban(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<UnbanOutcome> {
        match self.http.delete_ban(guild_id, user_id).await {
            Ok(_) => Ok(UnbanOutcome::Lifted),
            Err(source) if is_unknown_ban(&source) => {
                debug!(user_id = user_id.get(), "delete ban answered with unknown ban");
                Ok(UnbanOutcome::NotBanned)
            }
            Err(source) => Err(source.into()),
        }
    }

    async fn kick(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> anyhow::Result<()> {
        self.http
            .remove_guild_member(guild_id, user_id)
            .reason(reason)
            .await?;

        Ok(())
    }

    async fn set_timeout(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        until: Option<Timestamp>,
        reason: Option<&str>,
    ) -> anyhow::Result<()> {
        let mut request = self
            .http
            .update_guild_member(guild_id, user_id)
            .communication_disabled_until(until);

        if let Some(reason) = reason {
            request = request.reason(reason);
        }

        request.await?;

        Ok(())
    }

    async fn bulk_delete(
        &self,
        channel_id: Id<ChannelMarker>,
        count: u16,
    ) -> anyhow::Result<BulkDeleteOutcome> {
        let messages = self
            .http
            .channel_messages(channel_id)
            .limit(count)
            .await?
            .model()
            .await?;

        let partition = partition_bulk_deletable(
            messages
                .iter()
                .map(|message| (message.id, message.timestamp.as_secs())),
            now_unix_secs(),
        );

        match partition.deletable.as_slice() {
            [] => {}
            [single] => {
                self.http.delete_message(channel_id, *single).await?;
            }
            ids => {
                self.http.delete_messages(channel_id, ids).await?;
            }
        }

        Ok(BulkDeleteOutcome {
            deleted: partition.deletable.len(),
            too_old: partition.too_old,
        })
    }

    async fn reply(&self, interaction: &InteractionHandle, reply: &Reply) -> anyhow::Result<()> {
        let mut data = InteractionResponseDataBuilder::new()
            .content(reply.content.clone())
            .allowed_mentions(AllowedMentions::default());

        if reply.ephemeral {
            data = data.flags(MessageFlags::EPHEMERAL);
        }

        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(data.build()),
        };

        self.http
            .interaction(interaction.application_id)
            .create_response(interaction.id, &interaction.token, &response)
            .await?;

        Ok(())
    }

    async fn delete_reply(&self, interaction: &InteractionHandle) -> anyhow::Result<()> {
        self.http
            .interaction(interaction.application_id)
            .delete_response(&interaction.token)
            .await?;

        Ok(())
    }
}

fn is_unknown_ban(error: &HttpError) -> bool {
    matches!(
        error.kind(),
        ErrorType::Response {
            error: ApiError::General(general),
            ..
        } if general.code == UNKNOWN_BAN
    )
}
