use std::time::Duration;

use anyhow::Context as _;
use tracing::info;
use twilight_model::{
    application::command::{Command, CommandType},
    guild::Permissions,
    id::{Id, marker::ChannelMarker},
};
use twilight_util::builder::command::{CommandBuilder, IntegerBuilder};

use crate::CommandMeta;
use crate::invocation::COUNT_OPTION;
use crate::moderation::messages::{CLEAR_OUT_OF_RANGE, CLEAR_TOO_OLD, cleared};
use warden_core::{Context, Reply};

pub const META: CommandMeta = CommandMeta {
    name: "clear",
    desc: "Löscht eine Anzahl an Nachrichten.",
    permission: Permissions::MANAGE_MESSAGES,
};

const MIN_CLEAR: i64 = 1;
const MAX_CLEAR: i64 = 100;

/// How long the confirmation stays visible before it removes itself.
pub const CONFIRMATION_TTL: Duration = Duration::from_millis(3000);

pub fn command() -> anyhow::Result<Command> {
    let command = CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .default_member_permissions(META.permission)
        .option(
            IntegerBuilder::new(COUNT_OPTION, "Wie viele Nachrichten? (1–100)")
                .min_value(MIN_CLEAR)
                .max_value(MAX_CLEAR)
                .required(true),
        )
        .validate()?
        .build();

    Ok(command)
}

/// Delete a bounded number of recent channel messages.
pub async fn run(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    requested: i64,
) -> anyhow::Result<Reply> {
    if !(MIN_CLEAR..=MAX_CLEAR).contains(&requested) {
        return Ok(Reply::validation(CLEAR_OUT_OF_RANGE));
    }

    let count = u16::try_from(requested).context("clear count out of range")?;

    let outcome = ctx
        .platform
        .bulk_delete(channel_id, count)
        .await
        .context("bulk delete request failed")?;

    info!(
        channel_id = channel_id.get(),
        requested,
        deleted = outcome.deleted,
        too_old = outcome.too_old,
        "channel cleared"
    );

    if outcome.deleted == 0 && outcome.too_old > 0 {
        return Ok(Reply::validation(CLEAR_TOO_OLD));
    }

    Ok(Reply::success(cleared(outcome.deleted)).delete_after(CONFIRMATION_TTL))
}
