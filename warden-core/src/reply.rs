use std::time::Duration;

/// What kind of outcome a reply reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReplyKind {
    Success,
    /// Bad user input; no platform action was attempted.
    Validation,
    /// The platform action failed.
    Failure,
}

/// The single response an invocation produces.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub content: String,
    pub ephemeral: bool,
    /// Remove the reply again after this delay (best effort).
    pub delete_after: Option<Duration>,
}

impl Reply {
    fn new(kind: ReplyKind, content: impl Into<String>, ephemeral: bool) -> Self {
        Self {
            kind,
            content: content.into(),
            ephemeral,
            delete_after: None,
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(ReplyKind::Success, content, false)
    }

    pub fn validation(content: impl Into<String>) -> Self {
        Self::new(ReplyKind::Validation, content, false)
    }

    /// Generic failures are only shown to the invoker.
    pub fn failure(content: impl Into<String>) -> Self {
        Self::new(ReplyKind::Failure, content, true)
    }

    pub fn delete_after(mut self, delay: Duration) -> Self {
        self.delete_after = Some(delay);
        self
    }

    pub fn is_success(&self) -> bool {
        self.kind == ReplyKind::Success
    }
}
