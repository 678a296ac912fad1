//! Timestamp helpers used for folder disambiguation

use chrono::Utc;

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Append a millisecond timestamp to a folder name
///
/// Format: `{name}_{timestamp_ms}`
/// Example: `todo_app_1738300800123`
pub fn disambiguate(name: &str) -> String {
    format!("{}_{}", name, now_ms())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_returns_reasonable_timestamp() {
        let ts = now_ms();
        // Should be after 2020-01-01 and before 2100-01-01
        assert!(ts > 1577836800000);
        assert!(ts < 4102444800000);
    }

    #[test]
    fn test_disambiguate_format() {
        let name = disambiguate("todo_app");
        let suffix = name.strip_prefix("todo_app_").unwrap();
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }
}
