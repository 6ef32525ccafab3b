use anyhow::Result;
use twilight_model::application::command::Command;

use crate::CommandKind;

/// Build the full command set, one definition per [`CommandKind`].
///
/// Registration replaces the guild's commands with exactly this list, so
/// registering the same catalog twice leaves the same set behind.
pub fn catalog() -> Result<Vec<Command>> {
    CommandKind::ALL
        .into_iter()
        .map(CommandKind::definition)
        .collect()
}
