use std::sync::Arc;

use twilight_model::id::{Id, marker::GuildMarker};

pub mod config;
pub mod model;
pub mod platform;
pub mod reply;

pub use config::{Config, ConfigError};
pub use platform::Platform;
pub use reply::{Reply, ReplyKind};

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub platform: Arc<dyn Platform>,
    /// The one guild this bot moderates.
    pub guild_id: Id<GuildMarker>,
}

impl Context {
    /// Create a new application context.
    pub fn new(platform: Arc<dyn Platform>, guild_id: Id<GuildMarker>) -> Self {
        Self { platform, guild_id }
    }
}
