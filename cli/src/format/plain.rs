use crate::format::traits::BookmarkFormat;
use mybookmarks::models::Bookmark;

pub struct PlainBookmark<'a>(pub &'a Bookmark);

/// First eight characters of an id, enough to address it from the command line
pub fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(end, _)| &id[..end])
}

impl<'a> BookmarkFormat for PlainBookmark<'a> {
    fn to_string(&self) -> String {
        let b = self.0;
        let id = short_id(&b.id);
        let padding = id.len() + 3;
        let mut s = format!("{}. {}\n", id, b.title);
        s.push_str(&format!("{:>padding$} {}\n", ">", b.url));
        if !b.description.trim().is_empty() {
            s.push_str(&format!("{:>padding$} {}\n", "+", b.description));
        }
        if !b.tags.is_empty() {
            s.push_str(&format!("{:>padding$} {}\n", "#", b.tags.join(", ")));
        }
        s
    }
}
