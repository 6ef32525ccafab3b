use anyhow::Context as _;
use tracing::info;
use twilight_model::{
    application::command::{Command, CommandType},
    guild::Permissions,
    id::{Id, marker::GuildMarker},
};
use twilight_util::builder::command::{CommandBuilder, StringBuilder, UserBuilder};

use crate::CommandMeta;
use crate::invocation::{REASON_OPTION, USER_OPTION};
use crate::moderation::messages::{kicked, reason_or_default};
use warden_core::{Context, Reply, model::TargetUser};

pub const META: CommandMeta = CommandMeta {
    name: "kick",
    desc: "Kickt ein Mitglied.",
    permission: Permissions::KICK_MEMBERS,
};

pub fn command() -> anyhow::Result<Command> {
    let command = CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .default_member_permissions(META.permission)
        .option(UserBuilder::new(USER_OPTION, "Wer soll gekickt werden?").required(true))
        .option(StringBuilder::new(REASON_OPTION, "Grund (optional)"))
        .validate()?
        .build();

    Ok(command)
}

/// Remove a target user from the guild.
pub async fn run(
    ctx: &Context,
    guild_id: Id<GuildMarker>,
    target: &TargetUser,
    reason: Option<&str>,
) -> anyhow::Result<Reply> {
    let reason = reason_or_default(reason);

    ctx.platform
        .kick(guild_id, target.id, reason)
        .await
        .context("kick request failed")?;

    info!(target_id = target.id.get(), reason, "member kicked");

    Ok(Reply::success(kicked(target, reason)))
}
