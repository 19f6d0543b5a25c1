use crate::format::traits::BookmarkFormat;
use mybookmarks::models::Bookmark;

pub struct JsonBookmark<'a>(pub &'a Bookmark);

impl<'a> BookmarkFormat for JsonBookmark<'a> {
    fn to_string(&self) -> String {
        to_json(self.0)
    }
}

/// Pretty JSON for any serializable value, or an error object when encoding fails
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}
