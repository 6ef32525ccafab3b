mod platform;

use std::sync::Arc;

use anyhow::Context as _;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{CloseFrame, EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::{
    gateway::event::Event,
    id::{
        Id,
        marker::{ApplicationMarker, GuildMarker},
    },
};

use rustls::crypto::ring::default_provider;

use platform::TwilightPlatform;
use warden_commands::{catalog, handle_interaction};
use warden_core::{Config, Context};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load the .env file before anything reads the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    let config = Config::from_env().inspect_err(|source| error!(%source, "invalid configuration"))?;
    info!(guild_id = config.guild_id.get(), "configuration loaded");

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.token.clone()));

    // Commands must exist on Discord before any event is served
    if let Err(source) = register_commands(&http, config.application_id, config.guild_id).await {
        error!(?source, "command registration failed");
        return Err(source);
    }

    let ctx = Context::new(
        Arc::new(TwilightPlatform::new(Arc::clone(&http))),
        config.guild_id,
    );

    // Interactions arrive regardless of intents; GUILDS keeps the session minimal
    let mut shard = Shard::new(ShardId::new(0, 1), config.token.clone(), Intents::GUILDS);

    info!("Warden is connecting...");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let exit = loop {
        let item = tokio::select! {
            item = shard.next_event(EventTypeFlags::READY | EventTypeFlags::INTERACTION_CREATE) => item,
            _ = &mut shutdown => {
                info!("shutdown requested");
                break LoopExit::Shutdown;
            }
        };

        // The shard yields `None` once it has been fatally closed (bad token, disallowed intents)
        let Some(item) = item else {
            break LoopExit::StreamEnded;
        };

        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(ready) => {
                info!(user = %ready.user.name, "Warden is ready");
            }
            Event::InteractionCreate(interaction) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_interaction(ctx, interaction).await {
                        error!(?source, "failed to answer interaction");
                    }
                });
            }
            _ => {} // Ignore unused events
        }
    };

    if let Err(source) = exit.into_result() {
        error!(%source, "gateway stopped");
        return Err(source);
    }

    shard.close(CloseFrame::NORMAL);

    // Drive the shard until the close frame has gone out
    while let Some(item) = shard.next_event(EventTypeFlags::empty()).await {
        if let Ok(Event::GatewayClose(_)) = item {
            break;
        }
    }

    info!("Warden shut down");

    Ok(())
}

/// Why the gateway loop stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LoopExit {
    Shutdown,
    StreamEnded,
}

impl LoopExit {
    /// Only a requested shutdown is a clean exit.
    fn into_result(self) -> anyhow::Result<()> {
        match self {
            Self::Shutdown => Ok(()),
            Self::StreamEnded => Err(anyhow::anyhow!("gateway connection closed unexpectedly")),
        }
    }
}

/// Replace the guild's slash commands with the current catalog.
async fn register_commands(
    http: &Client,
    application_id: Id<ApplicationMarker>,
    guild_id: Id<GuildMarker>,
) -> anyhow::Result<()> {
    let commands = catalog().context("invalid command catalog")?;

    let registered = http
        .interaction(application_id)
        .set_guild_commands(guild_id, &commands)
        .await?
        .model()
        .await?;

    info!(
        guild_id = guild_id.get(),
        count = registered.len(),
        "slash commands registered"
    );

    Ok(())
}
