//! Transient, request-scoped values shared between handlers and the platform.

use twilight_model::id::{
    Id,
    marker::{ApplicationMarker, InteractionMarker, UserMarker},
};

/// A moderation target as resolved from a command's user option.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetUser {
    pub id: Id<UserMarker>,
    pub display_name: String,
}

impl TargetUser {
    pub fn new(id: Id<UserMarker>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    /// Placeholder used when the interaction carried no resolved user data.
    pub fn unresolved(id: Id<UserMarker>) -> Self {
        Self::new(id, format!("User {}", id.get()))
    }
}

/// Everything needed to answer (and later delete the answer to) an interaction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InteractionHandle {
    pub id: Id<InteractionMarker>,
    pub application_id: Id<ApplicationMarker>,
    pub token: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnbanOutcome {
    Lifted,
    /// The user had no active ban.
    NotBanned,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BulkDeleteOutcome {
    pub deleted: usize,
    /// Messages skipped because they are past the bulk-delete age limit.
    pub too_old: usize,
}
