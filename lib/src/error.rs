/// Error type for the mybookmarks library
///
/// Only genuine failures live here. Expected outcomes such as adding a URL that is
/// already bookmarked are reported through `AddOutcome` / `UpdateOutcome` instead.
#[derive(Debug, thiserror::Error)]
pub enum MyBookmarksError {
    /// SQLite storage backend errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O errors (import/export files, config)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Bookmark id (or id prefix) that does not resolve to a bookmark
    #[error("Bookmark with ID {0} not found")]
    NotFound(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Import/Export errors
    #[error("Import/Export error: {0}")]
    ImportExport(String),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Persistence backend refused a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error for cases that don't fit other categories
    #[error("{0}")]
    Other(String),
}

/// Result type alias using MyBookmarksError
pub type Result<T> = std::result::Result<T, MyBookmarksError>;

impl From<String> for MyBookmarksError {
    fn from(s: String) -> Self {
        MyBookmarksError::Other(s)
    }
}

impl From<&str> for MyBookmarksError {
    fn from(s: &str) -> Self {
        MyBookmarksError::Other(s.to_string())
    }
}

impl From<serde_yaml::Error> for MyBookmarksError {
    fn from(err: serde_yaml::Error) -> Self {
        MyBookmarksError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for MyBookmarksError {
    fn from(err: serde_json::Error) -> Self {
        MyBookmarksError::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MyBookmarksError::NotFound("abc".into()), "Bookmark with ID abc not found")]
    #[case(MyBookmarksError::InvalidInput("empty url".into()), "Invalid input: empty url")]
    #[case(MyBookmarksError::Storage("quota".into()), "Storage error: quota")]
    #[case(MyBookmarksError::Other("plain".into()), "plain")]
    fn test_error_display(#[case] err: MyBookmarksError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let converted: MyBookmarksError = err.into();
        assert!(matches!(converted, MyBookmarksError::Json(_)));
    }

    #[test]
    fn test_from_str() {
        let err: MyBookmarksError = "boom".into();
        assert!(matches!(err, MyBookmarksError::Other(ref s) if s == "boom"));
    }
}
