/// Longest filename stem produced by [`sanitize_filename`], in characters
pub const MAX_FILENAME_LEN: usize = 100;

/// Characters that are not allowed in filenames on common filesystems
const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Sanitize a title for safe filesystem usage.
///
/// Each forbidden character becomes `_` and the result is cut to
/// [`MAX_FILENAME_LEN`] characters. Whitespace and reserved device names are left alone.
pub fn sanitize_filename(title: &str) -> String {
    title
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_FILENAME_LEN)
        .collect()
}

/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30.0), "30s");
        assert_eq!(format_duration(90.0), "1m 30s");
        assert_eq!(format_duration(3661.0), "1h 1m 1s");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(
            sanitize_filename("Top 10: Best/Worst <Movies> 2024?"),
            "Top 10_ Best_Worst _Movies_ 2024_"
        );
        assert_eq!(sanitize_filename(r#"a\b|c"d*e"#), "a_b_c_d_e");
        assert_eq!(sanitize_filename("  spaced  "), "  spaced  ");
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "x".repeat(250);
        assert_eq!(sanitize_filename(&long).chars().count(), MAX_FILENAME_LEN);

        let multibyte = "ü".repeat(150);
        assert_eq!(sanitize_filename(&multibyte), "ü".repeat(MAX_FILENAME_LEN));
    }

    #[test]
    fn test_sanitize_properties() {
        let repeated = "a:b/".repeat(60);
        let titles = [
            "Top 10: Best/Worst <Movies> 2024?",
            "***???***",
            "",
            "Plain title",
            repeated.as_str(),
        ];

        for title in titles {
            let once = sanitize_filename(title);
            assert!(!once.chars().any(|c| FORBIDDEN_CHARS.contains(&c)), "{:?}", once);
            assert!(once.chars().count() <= MAX_FILENAME_LEN);
            assert_eq!(sanitize_filename(&once), once);
        }
    }
}
