pub mod config;
pub mod effects;
pub mod error;
pub mod import_export;
pub mod index;
pub mod models;
pub mod query;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod tags;
pub mod utils;
pub mod view;

// Re-export the types most callers need
pub use error::MyBookmarksError;
pub use models::{Bookmark, BookmarkInput, ViewState, ViewType};
pub use query::Query;
pub use storage::{MemoryStorage, SqliteStorage, StorageBackend};
pub use store::{AddOutcome, BookmarkStore, ImportSummary, Rejection, UpdateOutcome};
pub use view::ViewSession;
