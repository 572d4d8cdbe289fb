//! Maps release asset names onto the canonical local file names.

/// Keyword to local file name, in priority order.
const CLASSIFICATION_RULES: [(&str, &str); 3] = [
    ("local", "bymr-local.swf"),
    ("http", "bymr-http.swf"),
    ("stable", "bymr-stable.swf"),
];

/// Returns the file name an asset is stored under.
///
/// The first rule whose keyword occurs in `name` (case-sensitive) wins;
/// names matching no rule are kept as-is.
pub fn classify(name: &str) -> &str {
    CLASSIFICATION_RULES
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, file_name)| *file_name)
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_single_keyword() {
        assert_eq!(classify("bymr-local-v2.swf"), "bymr-local.swf");
        assert_eq!(classify("build-http.swf"), "bymr-http.swf");
        assert_eq!(classify("bymr-stable-v2.swf"), "bymr-stable.swf");
    }

    #[test]
    fn test_classify_local_wins_over_stable() {
        assert_eq!(classify("build-local-stable.swf"), "bymr-local.swf");
    }

    #[test]
    fn test_classify_http_wins_over_stable() {
        assert_eq!(classify("stable-http.swf"), "bymr-http.swf");
    }

    #[test]
    fn test_classify_local_wins_over_http() {
        assert_eq!(classify("http-localhost.swf"), "bymr-local.swf");
    }

    #[test]
    fn test_classify_no_match_keeps_name() {
        assert_eq!(classify("build-debug.swf"), "build-debug.swf");
        assert_eq!(classify(""), "");
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(classify("BYMR-LOCAL.swf"), "BYMR-LOCAL.swf");
        assert_eq!(classify("Stable.swf"), "Stable.swf");
    }

    #[test]
    fn test_classify_https_matches_http() {
        assert_eq!(classify("bymr-https.swf"), "bymr-http.swf");
    }
}
