use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A saved link with all its metadata
///
/// Serialized with camelCase field names and ISO-8601 dates, which is the shape used
/// both by the persisted `bookmarks` slot and by the JSON export file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Append a tag unless it is blank or already present.
    /// Returns true when the tag sequence changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if tag.trim().is_empty() || self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Returns true when the tag was present and got removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Replace `old` with `new`, merging into an existing `new` instead of duplicating it.
    pub fn rename_tag(&mut self, old: &str, new: &str) -> bool {
        if !self.has_tag(old) {
            return false;
        }
        self.tags.retain(|t| t != old);
        if !self.has_tag(new) {
            self.tags.push(new.to_string());
        }
        true
    }

    /// Change the URL and recompute the derived domain.
    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
        self.domain = domain_for(url);
    }
}

/// Fields supplied when creating a bookmark (manual add or import)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkInput {
    pub url: String,
    pub title: String,
    pub description: String,
    pub favicon: Option<String>,
    pub tags: Vec<String>,
    /// Creation time carried over from an import; `None` means "now"
    pub created_at: Option<DateTime<Utc>>,
}

impl BookmarkInput {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_favicon(mut self, favicon: impl Into<String>) -> Self {
        self.favicon = Some(favicon.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Host of `url` with a leading `www.` removed, or `None` when the URL does not parse
/// or has no host.
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    if host.is_empty() {
        return None;
    }
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Domain used for storage: the parsed host, or the raw URL text when it cannot be parsed.
pub fn domain_for(url: &str) -> String {
    extract_domain(url).unwrap_or_else(|| url.to_string())
}

pub fn default_favicon(domain: &str) -> String {
    format!("https://{}/favicon.ico", domain)
}

/// Drop blank and repeated tag names, keeping first-seen order.
pub fn dedup_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut unique: Vec<String> = Vec::new();
    for tag in tags {
        if !tag.trim().is_empty() && !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn sample() -> Bookmark {
        Bookmark {
            id: "b1".to_string(),
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            description: String::new(),
            domain: "example.com".to_string(),
            favicon: None,
            tags: vec!["rust".to_string()],
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[rstest]
    #[case("https://www.test.org/page", Some("test.org"))]
    #[case("http://example.com", Some("example.com"))]
    #[case("https://sub.www.example.com/x", Some("sub.www.example.com"))]
    #[case("https://WWW.Example.COM", Some("example.com"))]
    #[case("http://localhost:8080/a", Some("localhost"))]
    #[case("not a url", None)]
    #[case("", None)]
    fn test_extract_domain(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_domain(url).as_deref(), expected);
    }

    #[test]
    fn test_domain_for_falls_back_to_raw_url() {
        assert_eq!(domain_for("notes/today"), "notes/today");
        assert_eq!(domain_for("https://www.rust-lang.org"), "rust-lang.org");
    }

    #[test]
    fn test_default_favicon() {
        assert_eq!(
            default_favicon("example.com"),
            "https://example.com/favicon.ico"
        );
    }

    #[test]
    fn test_add_tag_is_idempotent() {
        let mut b = sample();
        assert!(b.add_tag("web"));
        assert!(!b.add_tag("web"));
        assert_eq!(b.tags, vec!["rust", "web"]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_add_tag_rejects_blank(#[case] tag: &str) {
        let mut b = sample();
        assert!(!b.add_tag(tag));
        assert_eq!(b.tags, vec!["rust"]);
    }

    #[test]
    fn test_add_tag_is_case_sensitive() {
        let mut b = sample();
        assert!(b.add_tag("Rust"));
        assert_eq!(b.tags, vec!["rust", "Rust"]);
    }

    #[test]
    fn test_remove_tag() {
        let mut b = sample();
        assert!(!b.remove_tag("absent"));
        assert!(b.remove_tag("rust"));
        assert!(b.tags.is_empty());
    }

    #[test]
    fn test_rename_tag_merges() {
        let mut b = sample();
        b.tags = vec!["x".into(), "y".into(), "z".into()];
        assert!(b.rename_tag("x", "y"));
        assert_eq!(b.tags, vec!["y", "z"]);
    }

    #[test]
    fn test_rename_tag_appends_new_name() {
        let mut b = sample();
        b.tags = vec!["x".into(), "z".into()];
        assert!(b.rename_tag("x", "w"));
        assert_eq!(b.tags, vec!["z", "w"]);
        assert!(!b.rename_tag("x", "w"));
    }

    #[test]
    fn test_set_url_recomputes_domain() {
        let mut b = sample();
        b.set_url("https://www.other.net/path");
        assert_eq!(b.url, "https://www.other.net/path");
        assert_eq!(b.domain, "other.net");
    }

    #[test]
    fn test_dedup_tags_preserves_order() {
        let tags = dedup_tags(
            ["b", "a", "b", "", "c", "a"]
                .iter()
                .map(|s| s.to_string()),
        );
        assert_eq!(tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let b = sample();
        let json = serde_json::to_string(&b).unwrap();
        assert!(json.contains("\"createdAt\":\"2024-01-02T03:04:05Z\""));
        assert!(!json.contains("favicon"));

        let back: Bookmark = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn test_deserialize_browser_date_format() {
        let json = r#"{"id":"1","url":"https://a.com","title":"A","domain":"a.com",
            "tags":[],"createdAt":"2023-05-06T07:08:09.123Z"}"#;
        let b: Bookmark = serde_json::from_str(json).unwrap();
        assert_eq!(b.description, "");
        assert_eq!(b.created_at.timestamp_millis(), 1683356889123);
    }

    #[test]
    fn test_input_builder() {
        let input = BookmarkInput::new("https://a.com", "A")
            .with_description("desc")
            .with_tags(["x", "y"])
            .with_favicon("https://a.com/icon.png");
        assert_eq!(input.tags, vec!["x", "y"]);
        assert_eq!(input.favicon.as_deref(), Some("https://a.com/icon.png"));
        assert!(input.created_at.is_none());
    }
}
