use anyhow::Context as _;
use tracing::info;
use twilight_model::{
    application::command::{Command, CommandType},
    guild::Permissions,
    id::{Id, marker::GuildMarker},
};
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use crate::CommandMeta;
use crate::invocation::USER_ID_OPTION;
use crate::moderation::messages::{invalid_user_id, unbanned};
use warden_core::{Context, Reply, model::UnbanOutcome};
use warden_utils::parse::parse_target_user_id;

pub const META: CommandMeta = CommandMeta {
    name: "unban",
    desc: "Entbannt ein Mitglied per ID.",
    permission: Permissions::BAN_MEMBERS,
};

pub fn command() -> anyhow::Result<Command> {
    let command = CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .default_member_permissions(META.permission)
        .option(
            StringBuilder::new(USER_ID_OPTION, "User ID des gebannten Nutzers").required(true),
        )
        .validate()?
        .build();

    Ok(command)
}

/// Lift the ban for a user id. A user without a ban still counts as unbanned.
pub async fn run(ctx: &Context, guild_id: Id<GuildMarker>, raw_user_id: &str) -> anyhow::Result<Reply> {
    let Some(user_id) = parse_target_user_id(raw_user_id) else {
        return Ok(Reply::validation(invalid_user_id(raw_user_id)));
    };

    let outcome = ctx
        .platform
        .unban(guild_id, user_id)
        .await
        .context("unban request failed")?;

    match outcome {
        UnbanOutcome::Lifted => info!(target_id = user_id.get(), "ban lifted"),
        UnbanOutcome::NotBanned => info!(target_id = user_id.get(), "unban of a user without a ban"),
    }

    Ok(Reply::success(unbanned(user_id.get())))
}
