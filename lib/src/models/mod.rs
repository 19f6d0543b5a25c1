pub mod bookmark;
pub mod view_state;

pub use bookmark::{domain_for, extract_domain, Bookmark, BookmarkInput};
pub use view_state::{ViewState, ViewType};
