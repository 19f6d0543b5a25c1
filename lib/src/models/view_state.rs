use crate::query::Query;
use serde::{Deserialize, Serialize};

/// How the bookmark list is organised in the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Domain,
    Tag,
}

impl ViewType {
    /// Parse view type from string (case-insensitive)
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "domain" | "domains" => Some(ViewType::Domain),
            "tag" | "tags" => Some(ViewType::Tag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Domain => "domain",
            ViewType::Tag => "tag",
        }
    }
}

/// User-facing selection state, persisted independently from bookmark data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    pub view_type: ViewType,
    pub search_query: String,
    pub selected_tags: Vec<String>,
    pub selected_domain: Option<String>,
    pub is_settings_open: bool,
}

impl ViewState {
    /// Switching views resets the selection that belongs to the other view.
    pub fn set_view_type(&mut self, view_type: ViewType) {
        self.view_type = view_type;
        match view_type {
            ViewType::Domain => self.selected_tags.clear(),
            ViewType::Tag => self.selected_domain = None,
        }
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if self.selected_tags.iter().any(|t| t == tag) {
            self.selected_tags.retain(|t| t != tag);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    pub fn set_selected_tags(&mut self, tags: Vec<String>) {
        self.selected_tags = tags;
    }

    pub fn toggle_domain(&mut self, domain: &str) {
        if self.selected_domain.as_deref() == Some(domain) {
            self.selected_domain = None;
        } else {
            self.selected_domain = Some(domain.to_string());
        }
    }

    pub fn set_selected_domain(&mut self, domain: Option<String>) {
        self.selected_domain = domain;
    }

    pub fn toggle_settings(&mut self) {
        self.is_settings_open = !self.is_settings_open;
    }

    pub fn set_settings_open(&mut self, open: bool) {
        self.is_settings_open = open;
    }

    /// Clear search text and selections; the active view is kept.
    pub fn reset_filters(&mut self) {
        self.search_query.clear();
        self.selected_tags.clear();
        self.selected_domain = None;
    }

    pub fn query(&self) -> Query {
        Query {
            search_query: self.search_query.clone(),
            selected_tags: self.selected_tags.clone(),
            selected_domain: self.selected_domain.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_state() {
        let state = ViewState::default();
        assert_eq!(state.view_type, ViewType::Domain);
        assert!(state.search_query.is_empty());
        assert!(state.selected_tags.is_empty());
        assert!(state.selected_domain.is_none());
        assert!(!state.is_settings_open);
    }

    #[rstest]
    #[case("domain", Some(ViewType::Domain))]
    #[case("Tags", Some(ViewType::Tag))]
    #[case("TAG", Some(ViewType::Tag))]
    #[case("folder", None)]
    fn test_view_type_from_string(#[case] input: &str, #[case] expected: Option<ViewType>) {
        assert_eq!(ViewType::from_string(input), expected);
    }

    #[test]
    fn test_switching_to_domain_clears_tags() {
        let mut state = ViewState {
            view_type: ViewType::Tag,
            selected_tags: vec!["a".into()],
            selected_domain: Some("a.com".into()),
            ..ViewState::default()
        };
        state.set_view_type(ViewType::Domain);
        assert!(state.selected_tags.is_empty());
        assert_eq!(state.selected_domain.as_deref(), Some("a.com"));
    }

    #[test]
    fn test_switching_to_tag_clears_domain() {
        let mut state = ViewState {
            selected_tags: vec!["a".into()],
            selected_domain: Some("a.com".into()),
            ..ViewState::default()
        };
        state.set_view_type(ViewType::Tag);
        assert!(state.selected_domain.is_none());
        assert_eq!(state.selected_tags, vec!["a"]);
    }

    #[test]
    fn test_toggle_tag() {
        let mut state = ViewState::default();
        state.toggle_tag("a");
        state.toggle_tag("b");
        assert_eq!(state.selected_tags, vec!["a", "b"]);
        state.toggle_tag("a");
        assert_eq!(state.selected_tags, vec!["b"]);
    }

    #[test]
    fn test_toggle_domain() {
        let mut state = ViewState::default();
        state.toggle_domain("a.com");
        assert_eq!(state.selected_domain.as_deref(), Some("a.com"));
        state.toggle_domain("b.com");
        assert_eq!(state.selected_domain.as_deref(), Some("b.com"));
        state.toggle_domain("b.com");
        assert!(state.selected_domain.is_none());
    }

    #[test]
    fn test_reset_filters_keeps_view() {
        let mut state = ViewState {
            view_type: ViewType::Tag,
            search_query: "rust".into(),
            selected_tags: vec!["a".into()],
            selected_domain: None,
            is_settings_open: true,
        };
        state.reset_filters();
        assert_eq!(state.view_type, ViewType::Tag);
        assert!(state.search_query.is_empty());
        assert!(state.selected_tags.is_empty());
        assert!(state.is_settings_open);
    }

    #[test]
    fn test_settings_toggle() {
        let mut state = ViewState::default();
        state.toggle_settings();
        assert!(state.is_settings_open);
        state.set_settings_open(false);
        assert!(!state.is_settings_open);
    }

    #[test]
    fn test_serialized_shape() {
        let state = ViewState {
            view_type: ViewType::Tag,
            search_query: "q".into(),
            selected_tags: vec!["x".into()],
            selected_domain: None,
            is_settings_open: false,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "viewType": "tag",
                "searchQuery": "q",
                "selectedTags": ["x"],
                "selectedDomain": null,
                "isSettingsOpen": false
            })
        );
    }

    #[test]
    fn test_query_mirrors_selection() {
        let mut state = ViewState::default();
        state.set_search_query("docs");
        state.toggle_domain("a.com");
        let query = state.query();
        assert_eq!(query.search_query, "docs");
        assert_eq!(query.selected_domain.as_deref(), Some("a.com"));
        assert!(query.selected_tags.is_empty());
    }
}
