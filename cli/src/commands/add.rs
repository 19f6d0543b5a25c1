use super::helpers::{validate_tags, validate_url};
use super::{AppContext, BookmarkCommand};
use mybookmarks::error::{MyBookmarksError, Result};
use mybookmarks::{AddOutcome, BookmarkInput, Rejection, StorageBackend};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommand {
    pub url: String,
    pub tag: Option<Vec<String>>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub favicon: Option<String>,
}

impl BookmarkCommand for AddCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        let tags = self.tag.as_deref().unwrap_or(&[]);
        validate_tags(tags)?;
        validate_url(&self.url)?;

        // Without a title the URL stands in for it
        let title = self.title.as_deref().unwrap_or(&self.url);
        let mut input = BookmarkInput::new(&self.url, title)
            .with_description(self.comment.as_deref().unwrap_or(""))
            .with_tags(tags.iter().cloned());
        if let Some(favicon) = &self.favicon {
            input = input.with_favicon(favicon);
        }

        match ctx.store.add(input) {
            AddOutcome::Added(bookmark) => {
                eprintln!("Added bookmark {}", bookmark.id);
                print!("{}", ctx.format.render_bookmark(&bookmark));
                Ok(())
            }
            AddOutcome::Rejected(Rejection::DuplicateUrl) => Err(MyBookmarksError::InvalidInput(
                format!("Duplicate URL: {}", self.url),
            )),
            AddOutcome::Rejected(Rejection::EmptyUrl) => Err(MyBookmarksError::InvalidInput(
                "URL cannot be empty".to_string(),
            )),
            AddOutcome::Rejected(Rejection::EmptyTitle) => Err(MyBookmarksError::InvalidInput(
                "Title cannot be empty".to_string(),
            )),
        }
    }
}
