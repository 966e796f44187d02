//! MQTT-style topic matching for subscription patterns.

/// Return true if `topic` is matched by `pattern`.
///
/// - `+` matches exactly one level.
/// - `#` matches the remaining levels, including none; it must be last.
pub fn matches(pattern: &str, topic: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut top = topic.split('/');
    loop {
        match (pat.next(), top.next()) {
            (Some("#"), _) => return true,
            (Some("+"), Some(_)) => {}
            (Some(p), Some(t)) if p == t => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::matches;

    #[test]
    fn exact() {
        assert!(matches("auth/state", "auth/state"));
        assert!(!matches("auth/state", "auth/status"));
        assert!(!matches("auth/state", "auth/state/extra"));
        assert!(!matches("auth/state/extra", "auth/state"));
    }

    #[test]
    fn single_level() {
        assert!(matches("app/+", "app/route"));
        assert!(matches("app/+", "app/notice"));
        assert!(!matches("app/+", "app/notice/extra"));
        assert!(!matches("app/+", "auth/state"));
        assert!(matches("+/state", "auth/state"));
    }

    #[test]
    fn multi_level() {
        assert!(matches("page/#", "page/collections"));
        assert!(matches("page/#", "page/collections/filter"));
        assert!(matches("page/#", "page"));
        assert!(!matches("page/#", "pages/collections"));
        assert!(matches("#", "anything/at/all"));
    }
}
