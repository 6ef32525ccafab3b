pub mod catalog;
pub mod dispatch;
pub mod invocation;
pub mod moderation;

use anyhow::Result;
use twilight_model::{application::command::Command, guild::Permissions};

pub use catalog::catalog;
pub use dispatch::{dispatch, execute, handle_interaction};
pub use invocation::{CommandInvocation, ModerationCommand, OptionError};

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    /// Default member permission required to see and invoke the command.
    pub permission: Permissions,
}

/// Every slash command the bot registers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommandKind {
    Ban,
    Unban,
    Kick,
    Timeout,
    Untimeout,
    Clear,
}

impl CommandKind {
    pub const ALL: [CommandKind; 6] = [
        Self::Ban,
        Self::Unban,
        Self::Kick,
        Self::Timeout,
        Self::Untimeout,
        Self::Clear,
    ];

    pub fn meta(self) -> &'static CommandMeta {
        match self {
            Self::Ban => &moderation::ban::META,
            Self::Unban => &moderation::unban::META,
            Self::Kick => &moderation::kick::META,
            Self::Timeout => &moderation::timeout::META,
            Self::Untimeout => &moderation::untimeout::META,
            Self::Clear => &moderation::clear::META,
        }
    }

    pub fn name(self) -> &'static str {
        self.meta().name
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The slash command definition registered with Discord.
    pub fn definition(self) -> Result<Command> {
        match self {
            Self::Ban => moderation::ban::command(),
            Self::Unban => moderation::unban::command(),
            Self::Kick => moderation::kick::command(),
            Self::Timeout => moderation::timeout::command(),
            Self::Untimeout => moderation::untimeout::command(),
            Self::Clear => moderation::clear::command(),
        }
    }
}
