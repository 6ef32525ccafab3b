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
use crate::moderation::messages::{banned, reason_or_default};
use warden_core::{Context, Reply, model::TargetUser};

pub const META: CommandMeta = CommandMeta {
    name: "ban",
    desc: "Bannt ein Mitglied.",
    permission: Permissions::BAN_MEMBERS,
};

pub fn command() -> anyhow::Result<Command> {
    let command = CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .default_member_permissions(META.permission)
        .option(UserBuilder::new(USER_OPTION, "Wer soll gebannt werden?").required(true))
        .option(StringBuilder::new(REASON_OPTION, "Grund (optional)"))
        .validate()?
        .build();

    Ok(command)
}

/// Ban a target user from the guild.
pub async fn run(
    ctx: &Context,
    guild_id: Id<GuildMarker>,
    target: &TargetUser,
    reason: Option<&str>,
) -> anyhow::Result<Reply> {
    let reason = reason_or_default(reason);

    ctx.platform
        .ban(guild_id, target.id, reason)
        .await
        .context("ban request failed")?;

    info!(target_id = target.id.get(), reason, "member banned");

    Ok(Reply::success(banned(target, reason)))
}
