use anyhow::Context as _;
use tracing::info;
use twilight_model::{
    application::command::{Command, CommandType},
    guild::Permissions,
    id::{Id, marker::GuildMarker},
    util::Timestamp,
};
use twilight_util::builder::command::{CommandBuilder, StringBuilder, UserBuilder};

use crate::CommandMeta;
use crate::invocation::{DURATION_OPTION, REASON_OPTION, USER_OPTION};
use crate::moderation::messages::{
    DURATION_OUT_OF_RANGE, INVALID_DURATION, reason_or_default, timed_out,
};
use warden_core::{Context, Reply, model::TargetUser};
use warden_utils::{duration::parse_duration_millis, time::now_unix_millis};

pub const META: CommandMeta = CommandMeta {
    name: "timeout",
    desc: "Timeout für ein Mitglied (z. B. 10m, 1h, 1d).",
    permission: Permissions::MODERATE_MEMBERS,
};

/// Discord rejects communication timeouts longer than 28 days.
pub const MAX_TIMEOUT_MILLIS: u64 = 28 * 24 * 60 * 60 * 1000;

pub fn command() -> anyhow::Result<Command> {
    let command = CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .default_member_permissions(META.permission)
        .option(UserBuilder::new(USER_OPTION, "Wer soll stumm geschaltet werden?").required(true))
        .option(StringBuilder::new(DURATION_OPTION, "z. B. 10m, 1h, 1d").required(true))
        .option(StringBuilder::new(REASON_OPTION, "Grund (optional)"))
        .validate()?
        .build();

    Ok(command)
}

/// Apply a temporary communication timeout to a target user.
pub async fn run(
    ctx: &Context,
    guild_id: Id<GuildMarker>,
    target: &TargetUser,
    duration: &str,
    reason: Option<&str>,
) -> anyhow::Result<Reply> {
    let Ok(duration_millis) = parse_duration_millis(duration) else {
        return Ok(Reply::validation(INVALID_DURATION));
    };

    if duration_millis == 0 || duration_millis > MAX_TIMEOUT_MILLIS {
        return Ok(Reply::validation(DURATION_OUT_OF_RANGE));
    }

    let reason = reason_or_default(reason);
    let expires_at = expires_at(now_unix_millis(), duration_millis)?;

    ctx.platform
        .set_timeout(guild_id, target.id, Some(expires_at), Some(reason))
        .await
        .context("timeout request failed")?;

    info!(
        target_id = target.id.get(),
        duration,
        reason,
        "member timed out"
    );

    Ok(Reply::success(timed_out(target, duration, reason)))
}

fn expires_at(now_millis: u64, duration_millis: u64) -> anyhow::Result<Timestamp> {
    let expires_at_micros = now_millis
        .checked_add(duration_millis)
        .and_then(|millis| millis.checked_mul(1_000))
        .and_then(|micros| i64::try_from(micros).ok())
        .context("timeout expiration overflows")?;

    Timestamp::from_micros(expires_at_micros).context("invalid timeout expiration timestamp")
}
