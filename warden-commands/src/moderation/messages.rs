//! Reply texts shown to the invoking moderator.

use warden_core::model::TargetUser;
use warden_utils::parse::sanitize_mentions;

/// Fallback audit-log and reply reason.
pub const DEFAULT_REASON: &str = "Kein Grund angegeben.";

pub const EXECUTION_FAILED: &str = "❌ Fehler bei der Ausführung.";
pub const INVALID_DURATION: &str = "❌ Ungültiges Zeitformat! Beispiel: 10m, 1h, 1d";
pub const DURATION_OUT_OF_RANGE: &str = "❌ Die Dauer muss zwischen 1s und 28d liegen.";
pub const CLEAR_OUT_OF_RANGE: &str = "❌ Bitte Zahl zwischen 1 und 100 angeben.";
pub const CLEAR_TOO_OLD: &str =
    "❌ Nachrichten, die älter als 14 Tage sind, können nicht gelöscht werden.";

pub fn reason_or_default(reason: Option<&str>) -> &str {
    reason.unwrap_or(DEFAULT_REASON)
}

pub fn banned(target: &TargetUser, reason: &str) -> String {
    format!(
        "🔨 {} wurde gebannt. Grund: {}",
        sanitize_mentions(&target.display_name),
        sanitize_mentions(reason)
    )
}

pub fn unbanned(user_id: u64) -> String {
    format!("✅ Nutzer mit ID {user_id} wurde entbannt.")
}

pub fn kicked(target: &TargetUser, reason: &str) -> String {
    format!(
        "👢 {} wurde gekickt. Grund: {}",
        sanitize_mentions(&target.display_name),
        sanitize_mentions(reason)
    )
}

pub fn timed_out(target: &TargetUser, duration: &str, reason: &str) -> String {
    format!(
        "⏳ {} wurde für {} stummgeschaltet. Grund: {}",
        sanitize_mentions(&target.display_name),
        duration,
        sanitize_mentions(reason)
    )
}

pub fn timeout_lifted(target: &TargetUser) -> String {
    format!(
        "🔊 Timeout für {} wurde aufgehoben.",
        sanitize_mentions(&target.display_name)
    )
}

pub fn cleared(deleted: usize) -> String {
    format!("🧹 {deleted} Nachrichten gelöscht.")
}

pub fn invalid_user_id(raw: &str) -> String {
    format!("❌ Ungültige User-ID: {}", sanitize_mentions(raw))
}

pub fn missing_option(option: &str) -> String {
    format!("❌ Fehlende Option: {option}")
}
