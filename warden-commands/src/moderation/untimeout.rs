use anyhow::Context as _;
use tracing::info;
use twilight_model::{
    application::command::{Command, CommandType},
    guild::Permissions,
    id::{Id, marker::GuildMarker},
};
use twilight_util::builder::command::{CommandBuilder, UserBuilder};

use crate::CommandMeta;
use crate::invocation::USER_OPTION;
use crate::moderation::messages::timeout_lifted;
use warden_core::{Context, Reply, model::TargetUser};

pub const META: CommandMeta = CommandMeta {
    name: "untimeout",
    desc: "Hebt den Timeout eines Mitglieds auf.",
    permission: Permissions::MODERATE_MEMBERS,
};

pub fn command() -> anyhow::Result<Command> {
    let command = CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .default_member_permissions(META.permission)
        .option(UserBuilder::new(USER_OPTION, "Wem soll Timeout entfernt werden?").required(true))
        .validate()?
        .build();

    Ok(command)
}

/// Remove an active timeout from a target user.
pub async fn run(ctx: &Context, guild_id: Id<GuildMarker>, target: &TargetUser) -> anyhow::Result<Reply> {
    ctx.platform
        .set_timeout(guild_id, target.id, None, None)
        .await
        .context("untimeout request failed")?;

    info!(target_id = target.id.get(), "timeout lifted");

    Ok(Reply::success(timeout_lifted(target)))
}
