use thiserror::Error;
use twilight_model::{
    application::interaction::application_command::{CommandData, CommandOptionValue},
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, UserMarker},
    },
};

use crate::CommandKind;
use warden_core::model::{InteractionHandle, TargetUser};

pub const USER_OPTION: &str = "user";
pub const USER_ID_OPTION: &str = "userid";
pub const REASON_OPTION: &str = "grund";
pub const DURATION_OPTION: &str = "dauer";
pub const COUNT_OPTION: &str = "anzahl";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OptionError {
    #[error("required option `{0}` is missing")]
    Missing(&'static str),
    #[error("option `{0}` has an unexpected type")]
    WrongType(&'static str),
}

impl OptionError {
    pub fn option(self) -> &'static str {
        match self {
            Self::Missing(name) | Self::WrongType(name) => name,
        }
    }
}

/// A slash command with its options extracted into typed fields.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ModerationCommand {
    Ban {
        target: TargetUser,
        reason: Option<String>,
    },
    Unban {
        user_id: String,
    },
    Kick {
        target: TargetUser,
        reason: Option<String>,
    },
    Timeout {
        target: TargetUser,
        duration: String,
        reason: Option<String>,
    },
    Untimeout {
        target: TargetUser,
    },
    Clear {
        count: i64,
    },
}

impl ModerationCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Ban { .. } => CommandKind::Ban,
            Self::Unban { .. } => CommandKind::Unban,
            Self::Kick { .. } => CommandKind::Kick,
            Self::Timeout { .. } => CommandKind::Timeout,
            Self::Untimeout { .. } => CommandKind::Untimeout,
            Self::Clear { .. } => CommandKind::Clear,
        }
    }

    /// Extract the options `kind` expects from raw interaction data.
    pub fn from_data(kind: CommandKind, data: &CommandData) -> Result<Self, OptionError> {
        let options = Options { data };

        let command = match kind {
            CommandKind::Ban => Self::Ban {
                target: options.user(USER_OPTION)?,
                reason: options.optional_string(REASON_OPTION)?,
            },
            CommandKind::Unban => Self::Unban {
                user_id: options.string(USER_ID_OPTION)?,
            },
            CommandKind::Kick => Self::Kick {
                target: options.user(USER_OPTION)?,
                reason: options.optional_string(REASON_OPTION)?,
            },
            CommandKind::Timeout => Self::Timeout {
                target: options.user(USER_OPTION)?,
                duration: options.raw_string(DURATION_OPTION)?,
                reason: options.optional_string(REASON_OPTION)?,
            },
            CommandKind::Untimeout => Self::Untimeout {
                target: options.user(USER_OPTION)?,
            },
            CommandKind::Clear => Self::Clear {
                count: options.integer(COUNT_OPTION)?,
            },
        };

        Ok(command)
    }
}

/// One command invocation, alive for the duration of its handler.
#[derive(Clone, Debug)]
pub struct CommandInvocation {
    pub command: ModerationCommand,
    pub guild_id: Id<GuildMarker>,
    pub channel_id: Id<ChannelMarker>,
    pub interaction: InteractionHandle,
}

struct Options<'a> {
    data: &'a CommandData,
}

impl Options<'_> {
    fn find(&self, name: &str) -> Option<&CommandOptionValue> {
        self.data
            .options
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.value)
    }

    fn user(&self, name: &'static str) -> Result<TargetUser, OptionError> {
        match self.find(name) {
            Some(CommandOptionValue::User(id)) => Ok(self.resolve_user(*id)),
            Some(_) => Err(OptionError::WrongType(name)),
            None => Err(OptionError::Missing(name)),
        }
    }

    fn string(&self, name: &'static str) -> Result<String, OptionError> {
        self.optional_string(name)?
            .ok_or(OptionError::Missing(name))
    }

    /// The value exactly as sent, blank or not.
    fn raw_string(&self, name: &'static str) -> Result<String, OptionError> {
        match self.find(name) {
            Some(CommandOptionValue::String(value)) => Ok(value.clone()),
            Some(_) => Err(OptionError::WrongType(name)),
            None => Err(OptionError::Missing(name)),
        }
    }

    /// Blank strings count as absent.
    fn optional_string(&self, name: &'static str) -> Result<Option<String>, OptionError> {
        match self.find(name) {
            Some(CommandOptionValue::String(value)) => {
                let value = value.trim();
                Ok((!value.is_empty()).then(|| value.to_owned()))
            }
            Some(_) => Err(OptionError::WrongType(name)),
            None => Ok(None),
        }
    }

    fn integer(&self, name: &'static str) -> Result<i64, OptionError> {
        match self.find(name) {
            Some(CommandOptionValue::Integer(value)) => Ok(*value),
            Some(_) => Err(OptionError::WrongType(name)),
            None => Err(OptionError::Missing(name)),
        }
    }

    /// Server nickname, then global display name, then username.
    fn resolve_user(&self, id: Id<UserMarker>) -> TargetUser {
        let Some(resolved) = self.data.resolved.as_ref() else {
            return TargetUser::unresolved(id);
        };

        let nick = resolved
            .members
            .get(&id)
            .and_then(|member| member.nick.clone());

        match (nick, resolved.users.get(&id)) {
            (Some(nick), _) => TargetUser::new(id, nick),
            (None, Some(user)) => {
                TargetUser::new(id, user.global_name.clone().unwrap_or_else(|| user.name.clone()))
            }
            (None, None) => TargetUser::unresolved(id),
        }
    }
}
