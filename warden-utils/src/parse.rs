use twilight_model::id::{Id, marker::UserMarker};

/// Parse the user id typed into a string option such as `userid`.
///
/// Accepts a raw snowflake or a pasted mention (`<@id>`, `<@!id>`); zero is rejected.
pub fn parse_target_user_id(raw: &str) -> Option<Id<UserMarker>> {
    let trimmed = raw.trim();

    let numeric = if trimmed.starts_with("<@") && trimmed.ends_with('>') {
        let without_wrappers = trimmed.strip_prefix("<@")?.strip_suffix('>')?;
        without_wrappers
            .strip_prefix('!')
            .unwrap_or(without_wrappers)
    } else {
        trimmed
    };

    let id = numeric.parse::<u64>().ok()?;

    Id::new_checked(id)
}

/// Break `@` so user-supplied text can't form mentions when echoed back.
pub fn sanitize_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_raw_ids_and_mentions() {
        assert_eq!(parse_target_user_id("1234"), Some(Id::new(1234)));
        assert_eq!(parse_target_user_id(" <@1234> "), Some(Id::new(1234)));
        assert_eq!(parse_target_user_id("<@!1234>"), Some(Id::new(1234)));
    }

    #[test]
    fn rejects_garbage_and_zero() {
        assert_eq!(parse_target_user_id(""), None);
        assert_eq!(parse_target_user_id("abc"), None);
        assert_eq!(parse_target_user_id("<@abc>"), None);
        assert_eq!(parse_target_user_id("0"), None);
        assert_eq!(parse_target_user_id("-5"), None);
    }

    #[test]
    fn mentions_are_defused() {
        assert_eq!(sanitize_mentions("@everyone"), "@\u{200B}everyone");
        assert_eq!(sanitize_mentions("spam"), "spam");
    }
}
