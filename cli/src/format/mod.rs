use crate::{
    format::{json::JsonBookmark, plain::PlainBookmark, traits::BookmarkFormat},
    output::colorize::{colored_heading, Colorize, ColorizeBookmark},
};
use mybookmarks::models::Bookmark;
use mybookmarks::query::BookmarkGroup;
use serde::Serialize;

pub mod json;
pub mod plain;
pub mod traits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Plain,
    Colored,
}

/// One row of a tag or domain listing
#[derive(Debug, Serialize)]
pub struct CountRow<'a> {
    pub name: &'a str,
    pub count: usize,
}

impl OutputFormat {
    pub fn from_string(format: &str) -> Self {
        match format {
            "json" => OutputFormat::Json,
            "plain" | "text" => OutputFormat::Plain,
            _ => OutputFormat::Colored,
        }
    }

    /// `--nc` turns colored output into plain text
    pub fn resolve(format: &str, no_color: bool) -> Self {
        match Self::from_string(format) {
            OutputFormat::Colored if no_color => OutputFormat::Plain,
            other => other,
        }
    }

    pub fn render_bookmark(self, bookmark: &Bookmark) -> String {
        match self {
            OutputFormat::Json => JsonBookmark(bookmark).to_string(),
            OutputFormat::Plain => PlainBookmark(bookmark).to_string(),
            OutputFormat::Colored => ColorizeBookmark(bookmark).to_colored(),
        }
    }

    pub fn render_groups(self, groups: &[BookmarkGroup]) -> String {
        if self == OutputFormat::Json {
            return json::to_json(groups);
        }
        let mut out = String::new();
        for group in groups {
            let heading = match self {
                OutputFormat::Colored => colored_heading(&group.name, group.bookmarks.len()),
                _ => format!("{} ({})", group.name, group.bookmarks.len()),
            };
            out.push_str(&heading);
            out.push('\n');
            for bookmark in &group.bookmarks {
                out.push_str(&self.render_bookmark(bookmark));
            }
            out.push('\n');
        }
        out
    }

    pub fn render_counts(self, rows: &[CountRow]) -> String {
        match self {
            OutputFormat::Json => json::to_json(rows),
            _ => rows
                .iter()
                .map(|row| format!("{} ({})\n", row.name, row.count))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn bookmark() -> Bookmark {
        Bookmark {
            id: "id-1".into(),
            url: "https://a.com".into(),
            title: "A".into(),
            description: String::new(),
            domain: "a.com".into(),
            favicon: None,
            tags: vec!["x".into()],
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("json", false, OutputFormat::Json)]
    #[case("plain", false, OutputFormat::Plain)]
    #[case("colored", false, OutputFormat::Colored)]
    #[case("colored", true, OutputFormat::Plain)]
    #[case("whatever", true, OutputFormat::Plain)]
    #[case("json", true, OutputFormat::Json)]
    fn test_resolve(#[case] name: &str, #[case] nc: bool, #[case] expected: OutputFormat) {
        assert_eq!(OutputFormat::resolve(name, nc), expected);
    }

    #[test]
    fn test_render_groups_plain() {
        let b = bookmark();
        let groups = vec![BookmarkGroup {
            name: "a.com".into(),
            bookmarks: vec![&b],
        }];
        let text = OutputFormat::Plain.render_groups(&groups);
        assert!(text.starts_with("a.com (1)\n"));
        assert!(text.contains("id-1. A"));
    }

    #[test]
    fn test_render_groups_json() {
        let b = bookmark();
        let groups = vec![BookmarkGroup {
            name: "a.com".into(),
            bookmarks: vec![&b],
        }];
        let value: serde_json::Value =
            serde_json::from_str(&OutputFormat::Json.render_groups(&groups)).unwrap();
        assert_eq!(value[0]["name"], "a.com");
        assert_eq!(value[0]["bookmarks"][0]["url"], "https://a.com");
    }

    #[test]
    fn test_render_counts() {
        let rows = vec![CountRow { name: "rust", count: 2 }];
        assert_eq!(OutputFormat::Plain.render_counts(&rows), "rust (2)\n");
        assert!(OutputFormat::Json.render_counts(&rows).contains("\"count\": 2"));
    }
}
