use crate::effects::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::error::{MyBookmarksError, Result};
use crate::index::{self, DomainCount, TagCount};
use crate::models::bookmark::{dedup_tags, default_favicon, domain_for, Bookmark, BookmarkInput};
use crate::snapshot::StoredShape;
use crate::storage::{StorageBackend, BOOKMARKS_KEY};
use std::collections::{BTreeMap, HashSet};

/// Why `add` left the store unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A bookmark with this URL already exists
    DuplicateUrl,
    EmptyUrl,
    EmptyTitle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(Bookmark),
    Rejected(Rejection),
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }

    pub fn bookmark(&self) -> Option<&Bookmark> {
        match self {
            AddOutcome::Added(bookmark) => Some(bookmark),
            AddOutcome::Rejected(_) => None,
        }
    }
}

/// Result of an operation addressed by bookmark id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    /// The new URL already belongs to a different bookmark
    UrlTaken,
    /// The record has a blank URL or title
    Invalid,
}

/// Counts reported by `import_candidates`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub duplicates: usize,
    pub invalid: usize,
}

/// Owner of the `url -> Bookmark` map.
///
/// Every mutation writes the full snapshot through to the storage backend. A failed write
/// is logged and the in-memory state stays authoritative until the next successful write.
pub struct BookmarkStore<S: StorageBackend> {
    bookmarks: BTreeMap<String, Bookmark>,
    storage: S,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl<S: StorageBackend> BookmarkStore<S> {
    /// Empty store that ignores whatever the backend already holds
    pub fn new(storage: S) -> Self {
        Self {
            bookmarks: BTreeMap::new(),
            storage,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidGenerator),
        }
    }

    pub fn load(storage: S) -> Self {
        Self::load_with(storage, Box::new(SystemClock), Box::new(UuidGenerator))
    }

    pub fn load_with(storage: S, clock: Box<dyn Clock>, ids: Box<dyn IdGenerator>) -> Self {
        let mut store = Self {
            bookmarks: BTreeMap::new(),
            storage,
            clock,
            ids,
        };
        store.read_persisted();
        store
    }

    fn read_persisted(&mut self) {
        let raw = match self.storage.get(BOOKMARKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                log::error!("Failed to read bookmarks from storage: {}", e);
                return;
            }
        };

        let shape = match StoredShape::parse(&raw) {
            Ok(shape) => shape,
            Err(e) => {
                log::error!("Failed to load bookmarks from storage: {}", e);
                return;
            }
        };

        let legacy = matches!(shape, StoredShape::Legacy(_));
        self.bookmarks = self.migrate(shape);

        if legacy {
            log::info!(
                "Migrated {} bookmark(s) from the legacy list layout",
                self.bookmarks.len()
            );
            self.persist();
        } else {
            log::debug!("Loaded {} bookmark(s)", self.bookmarks.len());
        }
    }

    /// Normalise decoded records into the canonical map.
    fn migrate(&self, shape: StoredShape) -> BTreeMap<String, Bookmark> {
        let mut map = BTreeMap::new();
        let mut seen_ids = HashSet::new();

        for entry in shape.into_entries() {
            let record = match entry.record {
                Ok(record) => record,
                Err(reason) => {
                    log::warn!("Skipping stored bookmark {}: {}", entry.reference, reason);
                    continue;
                }
            };
            let Some((url, title)) = record.required_fields() else {
                log::warn!(
                    "Skipping stored bookmark {}: missing url or title",
                    entry.reference
                );
                continue;
            };
            if map.contains_key(url) {
                log::warn!("Skipping stored bookmark {}: duplicate url", entry.reference);
                continue;
            }

            let id = match record.id.as_deref() {
                Some(id) if !id.is_empty() && !seen_ids.contains(id) => id.to_string(),
                _ => self.ids.next_id(),
            };
            seen_ids.insert(id.clone());

            let bookmark = Bookmark {
                id,
                url: url.to_string(),
                title: title.to_string(),
                description: record.description.clone().unwrap_or_default(),
                domain: domain_for(url),
                favicon: record.favicon.clone().filter(|f| !f.is_empty()),
                tags: dedup_tags(record.tags.clone().unwrap_or_default()),
                created_at: record.created_at().unwrap_or_else(|| self.clock.now()),
            };
            map.insert(bookmark.url.clone(), bookmark);
        }
        map
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.bookmarks)
            .map_err(MyBookmarksError::from)
            .and_then(|json| self.storage.set(BOOKMARKS_KEY, &json));
        if let Err(e) = result {
            log::error!("Failed to save bookmarks to storage: {}", e);
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn url_of(&self, id: &str) -> Option<String> {
        self.bookmarks
            .values()
            .find(|b| b.id == id)
            .map(|b| b.url.clone())
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Bookmark> {
        self.bookmarks.values_mut().find(|b| b.id == id)
    }

    /// Validate and insert without persisting
    fn insert_new(&mut self, input: BookmarkInput) -> AddOutcome {
        let url = input.url.trim().to_string();
        let title = input.title.trim().to_string();
        if url.is_empty() {
            return AddOutcome::Rejected(Rejection::EmptyUrl);
        }
        if title.is_empty() {
            return AddOutcome::Rejected(Rejection::EmptyTitle);
        }
        if self.bookmarks.contains_key(&url) {
            log::debug!("Already bookmarked: {}", url);
            return AddOutcome::Rejected(Rejection::DuplicateUrl);
        }

        let domain = domain_for(&url);
        let favicon = input
            .favicon
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| default_favicon(&domain));
        let bookmark = Bookmark {
            id: self.fresh_id(),
            url: url.clone(),
            title,
            description: input.description,
            domain,
            favicon: Some(favicon),
            tags: dedup_tags(input.tags),
            created_at: input.created_at.unwrap_or_else(|| self.clock.now()),
        };
        self.bookmarks.insert(url, bookmark.clone());
        AddOutcome::Added(bookmark)
    }

    pub fn add(&mut self, input: BookmarkInput) -> AddOutcome {
        let outcome = self.insert_new(input);
        if let AddOutcome::Added(bookmark) = &outcome {
            log::debug!("Added bookmark {} ({})", bookmark.id, bookmark.url);
            self.persist();
        }
        outcome
    }

    /// Replace the fields of the bookmark with `record.id`.
    ///
    /// `id` and `created_at` are kept from the stored record and `domain` is derived
    /// again from the URL. Moving onto a URL owned by another bookmark is refused.
    pub fn update(&mut self, record: Bookmark) -> UpdateOutcome {
        let Some(old_url) = self.url_of(&record.id) else {
            return UpdateOutcome::NotFound;
        };
        let new_url = record.url.trim().to_string();
        if new_url.is_empty() || record.title.trim().is_empty() {
            return UpdateOutcome::Invalid;
        }
        if new_url != old_url && self.bookmarks.contains_key(&new_url) {
            log::warn!(
                "Not moving bookmark {} to {}: URL already bookmarked",
                record.id,
                new_url
            );
            return UpdateOutcome::UrlTaken;
        }

        let Some(existing) = self.bookmarks.remove(&old_url) else {
            return UpdateOutcome::NotFound;
        };
        let mut updated = record;
        updated.set_url(&new_url);
        updated.created_at = existing.created_at;
        updated.tags = dedup_tags(updated.tags);
        self.bookmarks.insert(new_url, updated);
        self.persist();
        UpdateOutcome::Updated
    }

    pub fn delete(&mut self, id: &str) -> UpdateOutcome {
        let Some(url) = self.url_of(id) else {
            return UpdateOutcome::NotFound;
        };
        self.bookmarks.remove(&url);
        log::debug!("Deleted bookmark {} ({})", id, url);
        self.persist();
        UpdateOutcome::Updated
    }

    pub fn remove_tag(&mut self, id: &str, tag: &str) -> UpdateOutcome {
        let Some(bookmark) = self.get_mut(id) else {
            return UpdateOutcome::NotFound;
        };
        if bookmark.remove_tag(tag) {
            self.persist();
        }
        UpdateOutcome::Updated
    }

    pub fn add_tag(&mut self, id: &str, tag: &str) -> UpdateOutcome {
        let Some(bookmark) = self.get_mut(id) else {
            return UpdateOutcome::NotFound;
        };
        if bookmark.add_tag(tag) {
            self.persist();
        }
        UpdateOutcome::Updated
    }

    /// Rename `old_tag` on every bookmark, merging into `new_tag` where both exist.
    /// Returns the number of bookmarks changed.
    pub fn rename_tag_everywhere(&mut self, old_tag: &str, new_tag: &str) -> usize {
        if old_tag == new_tag || new_tag.trim().is_empty() {
            return 0;
        }
        let changed = self
            .bookmarks
            .values_mut()
            .map(|b| b.rename_tag(old_tag, new_tag))
            .filter(|changed| *changed)
            .count();
        if changed > 0 {
            log::debug!("Renamed tag '{}' to '{}' on {} bookmark(s)", old_tag, new_tag, changed);
            self.persist();
        }
        changed
    }

    /// Returns the number of bookmarks the tag was removed from.
    pub fn delete_tag_everywhere(&mut self, tag: &str) -> usize {
        let changed = self
            .bookmarks
            .values_mut()
            .map(|b| b.remove_tag(tag))
            .filter(|changed| *changed)
            .count();
        if changed > 0 {
            self.persist();
        }
        changed
    }

    pub fn clear(&mut self) {
        self.bookmarks.clear();
        self.persist();
    }

    /// Add every candidate, skipping duplicates, and persist once at the end.
    pub fn import_candidates<I>(&mut self, candidates: I) -> ImportSummary
    where
        I: IntoIterator<Item = BookmarkInput>,
    {
        let mut summary = ImportSummary::default();
        for candidate in candidates {
            match self.insert_new(candidate) {
                AddOutcome::Added(_) => summary.added += 1,
                AddOutcome::Rejected(Rejection::DuplicateUrl) => summary.duplicates += 1,
                AddOutcome::Rejected(_) => summary.invalid += 1,
            }
        }
        if summary.added > 0 {
            self.persist();
        }
        log::info!(
            "Imported {} bookmark(s), {} already present, {} invalid",
            summary.added,
            summary.duplicates,
            summary.invalid
        );
        summary
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.values().find(|b| b.id == id)
    }

    pub fn get_by_url(&self, url: &str) -> Option<&Bookmark> {
        self.bookmarks.get(url)
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.bookmarks.contains_key(url)
    }

    /// Look a bookmark up by full id or by an unambiguous id prefix
    pub fn resolve_id(&self, id_or_prefix: &str) -> Result<&Bookmark> {
        if let Some(bookmark) = self.get(id_or_prefix) {
            return Ok(bookmark);
        }
        if id_or_prefix.is_empty() {
            return Err(MyBookmarksError::NotFound(String::new()));
        }
        let mut matches = self
            .bookmarks
            .values()
            .filter(|b| b.id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(bookmark), None) => Ok(bookmark),
            (Some(_), Some(_)) => Err(MyBookmarksError::InvalidInput(format!(
                "ID prefix '{}' matches more than one bookmark",
                id_or_prefix
            ))),
            (None, _) => Err(MyBookmarksError::NotFound(id_or_prefix.to_string())),
        }
    }

    /// All bookmarks in URL order
    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.bookmarks.values()
    }

    /// The URL-keyed map, as written to storage and export files
    pub fn as_map(&self) -> &BTreeMap<String, Bookmark> {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn all_tags(&self) -> Vec<TagCount> {
        index::tag_counts(self.bookmarks.values())
    }

    pub fn all_domains(&self) -> Vec<DomainCount> {
        index::domain_counts(self.bookmarks.values())
    }
}
