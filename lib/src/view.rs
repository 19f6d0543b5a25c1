use crate::error::MyBookmarksError;
use crate::models::{ViewState, ViewType};
use crate::query::Query;
use crate::storage::{StorageBackend, VIEW_STATE_KEY};

/// View state bound to its storage slot; each transition is saved right away.
pub struct ViewSession<S: StorageBackend> {
    state: ViewState,
    storage: S,
}

impl<S: StorageBackend> ViewSession<S> {
    /// Restore the saved state, or start from defaults when the slot is empty or unreadable
    pub fn load(storage: S) -> Self {
        let state = match storage.get(VIEW_STATE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::error!("Failed to load view state, using defaults: {}", e);
                ViewState::default()
            }),
            Ok(None) => ViewState::default(),
            Err(e) => {
                log::error!("Failed to read view state: {}", e);
                ViewState::default()
            }
        };
        Self { state, storage }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn query(&self) -> Query {
        self.state.query()
    }

    fn update<F: FnOnce(&mut ViewState)>(&mut self, change: F) {
        change(&mut self.state);
        self.persist();
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.state)
            .map_err(MyBookmarksError::from)
            .and_then(|json| self.storage.set(VIEW_STATE_KEY, &json));
        if let Err(e) = result {
            log::error!("Failed to save view state: {}", e);
        }
    }

    pub fn set_view_type(&mut self, view_type: ViewType) {
        self.update(|s| s.set_view_type(view_type));
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.update(|s| s.set_search_query(query));
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.update(|s| s.toggle_tag(tag));
    }

    pub fn set_selected_tags(&mut self, tags: Vec<String>) {
        self.update(|s| s.set_selected_tags(tags));
    }

    pub fn toggle_domain(&mut self, domain: &str) {
        self.update(|s| s.toggle_domain(domain));
    }

    pub fn set_selected_domain(&mut self, domain: Option<String>) {
        self.update(|s| s.set_selected_domain(domain));
    }

    pub fn toggle_settings(&mut self) {
        self.update(ViewState::toggle_settings);
    }

    pub fn set_settings_open(&mut self, open: bool) {
        self.update(|s| s.set_settings_open(open));
    }

    pub fn reset_filters(&mut self) {
        self.update(ViewState::reset_filters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_missing_slot_loads_defaults() {
        let storage = MemoryStorage::new();
        let session = ViewSession::load(&storage);
        assert_eq!(session.state(), &ViewState::default());
    }

    #[test]
    fn test_corrupt_slot_loads_defaults() {
        let storage = MemoryStorage::with_entry(VIEW_STATE_KEY, "{not json");
        let session = ViewSession::load(&storage);
        assert_eq!(session.state(), &ViewState::default());
    }

    #[test]
    fn test_partial_slot_fills_defaults() {
        let storage = MemoryStorage::with_entry(VIEW_STATE_KEY, r#"{"viewType":"tag"}"#);
        let session = ViewSession::load(&storage);
        assert_eq!(session.state().view_type, ViewType::Tag);
        assert!(session.state().selected_tags.is_empty());
    }

    #[test]
    fn test_transitions_are_persisted() {
        let storage = MemoryStorage::new();
        {
            let mut session = ViewSession::load(&storage);
            session.set_view_type(ViewType::Tag);
            session.toggle_tag("rust");
            session.set_search_query("book");
            session.toggle_settings();
        }
        let session = ViewSession::load(&storage);
        assert_eq!(session.state().view_type, ViewType::Tag);
        assert_eq!(session.state().selected_tags, vec!["rust"]);
        assert!(session.state().is_settings_open);
        assert_eq!(session.query().search_query, "book");
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        let mut session = ViewSession::load(&storage);
        session.toggle_domain("a.com");
        assert_eq!(session.state().selected_domain.as_deref(), Some("a.com"));
        storage.set_fail_writes(false);
        assert_eq!(storage.get(VIEW_STATE_KEY).unwrap(), None);
    }

    #[test]
    fn test_reset_filters_persisted() {
        let storage = MemoryStorage::new();
        let mut session = ViewSession::load(&storage);
        session.set_selected_domain(Some("a.com".into()));
        session.set_selected_tags(vec!["x".into()]);
        session.reset_filters();
        let reloaded = ViewSession::load(&storage);
        assert!(reloaded.state().selected_domain.is_none());
        assert!(reloaded.state().selected_tags.is_empty());
    }
}
