use crate::error::Result;
use crate::models::Bookmark;
use crate::storage::StorageBackend;
use crate::store::BookmarkStore;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Pretty-printed JSON object keyed by URL, the same shape the importer reads back
pub fn export_json(bookmarks: &BTreeMap<String, Bookmark>) -> Result<String> {
    Ok(serde_json::to_string_pretty(bookmarks)?)
}

/// `mybookmarks_<YYYY-MM-DD>.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("mybookmarks_{}.json", date.format("%Y-%m-%d"))
}

/// Write the whole store to `path`, returning the number of bookmarks written
pub fn export_to_path<S: StorageBackend>(store: &BookmarkStore<S>, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = export_json(store.as_map())?;
    fs::write(path, json)?;
    log::info!("Exported {} bookmark(s) to {}", store.len(), path.display());
    Ok(store.len())
}
