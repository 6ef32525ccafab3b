use std::{env, fmt};

use thiserror::Error;
use twilight_model::id::{
    Id,
    marker::{ApplicationMarker, GuildMarker},
};

pub const TOKEN_VAR: &str = "DISCORD_TOKEN";
pub const APPLICATION_ID_VAR: &str = "CLIENT_ID";
pub const GUILD_ID_VAR: &str = "GUILD_ID";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {name} is not a valid snowflake: {value:?}")]
    InvalidId { name: &'static str, value: String },
}

/// Startup configuration, read once from the environment.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub application_id: Id<ApplicationMarker>,
    pub guild_id: Id<GuildMarker>,
}

impl Config {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let token = required(TOKEN_VAR)?;
        let application_id = parse_id(APPLICATION_ID_VAR, required(APPLICATION_ID_VAR)?)?;
        let guild_id = parse_id(GUILD_ID_VAR, required(GUILD_ID_VAR)?)?;

        Ok(Self {
            token,
            application_id,
            guild_id,
        })
    }
}

// The token never ends up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

fn parse_id<T>(name: &'static str, value: String) -> Result<Id<T>, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .and_then(Id::new_checked)
        .ok_or(ConfigError::InvalidId { name, value })
}
