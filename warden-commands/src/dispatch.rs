use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{debug, error, info, warn};
use twilight_model::{
    application::{command::CommandType, interaction::InteractionData},
    gateway::payload::incoming::InteractionCreate,
};

use crate::invocation::{CommandInvocation, ModerationCommand};
use crate::moderation::{ban, clear, kick, messages, timeout, unban, untimeout};
use crate::CommandKind;
use warden_core::{Context, Reply, ReplyKind, model::InteractionHandle};

/// Route a gateway interaction to its command handler and answer it.
///
/// Anything that is not a chat-input command for the configured guild is ignored.
/// Unknown command names (stale registrations) still get the generic failure reply.
pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let Some(InteractionData::ApplicationCommand(data)) = interaction.data.as_ref() else {
        return Ok(());
    };

    if data.kind != CommandType::ChatInput {
        return Ok(());
    }

    let Some(guild_id) = interaction.guild_id.filter(|id| *id == ctx.guild_id) else {
        debug!(
            guild_id = ?interaction.guild_id,
            command = %data.name,
            "ignoring command outside the configured guild"
        );
        return Ok(());
    };

    let Some(channel_id) = interaction.channel.as_ref().map(|channel| channel.id) else {
        warn!(command = %data.name, "command interaction without a channel");
        return Ok(());
    };

    let handle = InteractionHandle {
        id: interaction.id,
        application_id: interaction.application_id,
        token: interaction.token.clone(),
    };

    let Some(kind) = CommandKind::from_name(&data.name) else {
        warn!(command = %data.name, "unknown command");
        let reply = Reply::failure(messages::EXECUTION_FAILED);
        ctx.platform.reply(&handle, &reply).await?;
        return Ok(());
    };

    match ModerationCommand::from_data(kind, data) {
        Ok(command) => {
            let invocation = CommandInvocation {
                command,
                guild_id,
                channel_id,
                interaction: handle,
            };
            execute(&ctx, &invocation).await?;
        }
        Err(source) => {
            warn!(%source, command = kind.name(), "command with malformed options");
            let reply = Reply::validation(messages::missing_option(source.option()));
            ctx.platform.reply(&handle, &reply).await?;
        }
    }

    Ok(())
}

/// Run an invocation, send its single reply, and schedule the reply's cleanup.
pub async fn execute(ctx: &Context, invocation: &CommandInvocation) -> anyhow::Result<ReplyKind> {
    let reply = dispatch(ctx, invocation).await;

    ctx.platform.reply(&invocation.interaction, &reply).await?;

    debug!(
        command = invocation.command.kind().name(),
        outcome = ?reply.kind,
        "command answered"
    );

    if let Some(delay) = reply.delete_after {
        schedule_reply_deletion(Arc::clone(&ctx.platform), invocation.interaction.clone(), delay);
    }

    Ok(reply.kind)
}

/// Call the handler for an invocation. Handler errors become a generic failure reply.
pub async fn dispatch(ctx: &Context, invocation: &CommandInvocation) -> Reply {
    let guild_id = invocation.guild_id;

    let result = match &invocation.command {
        ModerationCommand::Ban { target, reason } => {
            ban::run(ctx, guild_id, target, reason.as_deref()).await
        }
        ModerationCommand::Unban { user_id } => unban::run(ctx, guild_id, user_id).await,
        ModerationCommand::Kick { target, reason } => {
            kick::run(ctx, guild_id, target, reason.as_deref()).await
        }
        ModerationCommand::Timeout {
            target,
            duration,
            reason,
        } => timeout::run(ctx, guild_id, target, duration, reason.as_deref()).await,
        ModerationCommand::Untimeout { target } => untimeout::run(ctx, guild_id, target).await,
        ModerationCommand::Clear { count } => clear::run(ctx, invocation.channel_id, *count).await,
    };

    match result {
        Ok(reply) => {
            if reply.kind == ReplyKind::Validation {
                info!(
                    command = invocation.command.kind().name(),
                    reply = %reply.content,
                    "command rejected"
                );
            }
            reply
        }
        Err(source) => {
            error!(
                ?source,
                command = invocation.command.kind().name(),
                "command failed"
            );
            Reply::failure(messages::EXECUTION_FAILED)
        }
    }
}

// Detached: the task outlives the invocation and its result is never observed.
fn schedule_reply_deletion(
    platform: Arc<dyn warden_core::Platform>,
    interaction: InteractionHandle,
    delay: Duration,
) {
    tokio::spawn(async move {
        sleep(delay).await;
        if let Err(source) = platform.delete_reply(&interaction).await {
            debug!(?source, "failed to delete confirmation reply");
        }
    });
}
