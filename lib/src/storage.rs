use crate::error::{MyBookmarksError, Result};
use rusqlite::{Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Slot holding the URL-keyed bookmark map
pub const BOOKMARKS_KEY: &str = "bookmarks";
/// Slot holding the persisted view state
pub const VIEW_STATE_KEY: &str = "bookmarkManager";

/// Key-value persistence port used by the bookmark store and the view session
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: StorageBackend + ?Sized> StorageBackend for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-memory backend, mainly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a backend pre-populated with one slot
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Make every subsequent `set` fail, as a full or read-only storage would
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(MyBookmarksError::Storage(format!(
                "write to '{}' rejected",
                key
            )));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite-backed key-value slots
pub struct SqliteStorage {
    conn: Connection,
    db_path: PathBuf,
}

impl SqliteStorage {
    pub fn init_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let storage = Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        storage.setup_tables()?;
        Ok(storage)
    }

    pub fn init(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let storage = Self {
            conn,
            db_path: db_path.to_path_buf(),
        };
        storage.setup_tables()?;
        Ok(storage)
    }

    /// Get the database file path
    pub fn get_path(&self) -> &Path {
        &self.db_path
    }

    fn setup_tables(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE if not exists kv_store (
                key text PRIMARY KEY,
                value text NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl StorageBackend for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;
        Ok(())
    }
}
