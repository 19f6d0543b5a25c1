/// Folder names that only exist as containers in browser exports
const EXPORT_ROOTS: &[&str] = &[
    "bookmarks",
    "bookmarks-bar",
    "bookmarks-toolbar",
    "bookmarks-menu",
    "other-bookmarks",
    "mobile-bookmarks",
];

/// Parse comma-separated tags, filtering empty ones
pub fn parse_tags(tags_str: &str) -> Vec<String> {
    tags_str
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Turn a folder heading into a tag: lowercase, whitespace runs become `-`
pub fn folder_tag(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// True for the container folders browsers put at the top of every export
pub fn is_export_root(tag: &str) -> bool {
    EXPORT_ROOTS.contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", vec![])]
    #[case(",", vec![])]
    #[case(",,", vec![])]
    #[case("rust", vec!["rust"])]
    #[case("rust,testing", vec!["rust", "testing"])]
    #[case(",rust,testing,", vec!["rust", "testing"])]
    #[case("  rust  ,  testing  ", vec!["rust", "testing"])]
    #[case("rust,,testing", vec!["rust", "testing"])]
    fn test_parse_tags(#[case] input: &str, #[case] expected: Vec<&str>) {
        let result = parse_tags(input);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_parse_tags_preserves_order() {
        let result = parse_tags(",z,a,m,b,");
        assert_eq!(result, vec!["z", "a", "m", "b"]);
    }

    #[test]
    fn test_parse_tags_handles_unicode() {
        let result = parse_tags(",rust,测试,программирование,");
        assert_eq!(result, vec!["rust", "测试", "программирование"]);
    }

    #[rstest]
    #[case("Work", "work")]
    #[case("Bookmarks Bar", "bookmarks-bar")]
    #[case("  Reading \t List  ", "reading-list")]
    #[case("Über  Projekte", "über-projekte")]
    #[case("", "")]
    fn test_folder_tag(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(folder_tag(input), expected);
    }

    #[rstest]
    #[case("bookmarks", true)]
    #[case("bookmarks-toolbar", true)]
    #[case("mobile-bookmarks", true)]
    #[case("work", false)]
    #[case("Bookmarks", false)]
    fn test_is_export_root(#[case] tag: &str, #[case] expected: bool) {
        assert_eq!(is_export_root(tag), expected);
    }
}
