//! Version details baked in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for `--version`
pub fn version_line() -> String {
    format!(
        "warren {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() >= 7);
    }

    #[test]
    fn test_date_is_iso_day() {
        assert_eq!(BUILD_DATE.len(), 10);
        assert_eq!(BUILD_DATE.matches('-').count(), 2);
    }

    #[test]
    fn test_version_line_mentions_both() {
        let line = version_line();
        assert!(line.starts_with("warren "));
        assert!(line.contains(BUILD_COMMIT));
        assert!(line.contains(BUILD_DATE));
    }
}
