use super::helpers::{check_outcome, validate_url};
use super::{AppContext, BookmarkCommand};
use mybookmarks::error::{MyBookmarksError, Result};
use mybookmarks::StorageBackend;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommand {
    pub id: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub favicon: Option<String>,
}

impl UpdateCommand {
    fn has_edit_options(&self) -> bool {
        self.url.is_some() || self.title.is_some() || self.comment.is_some() || self.favicon.is_some()
    }
}

impl BookmarkCommand for UpdateCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        if !self.has_edit_options() {
            return Err(MyBookmarksError::InvalidInput(
                "Nothing to update: pass --url, --title, --comment or --favicon".to_string(),
            ));
        }

        if let Some(url) = &self.url {
            validate_url(url)?;
        }

        let mut record = ctx.store.resolve_id(&self.id)?.clone();
        if let Some(url) = &self.url {
            record.set_url(url);
        }
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(comment) = &self.comment {
            record.description = comment.clone();
        }
        if let Some(favicon) = &self.favicon {
            record.favicon = Some(favicon.clone()).filter(|f| !f.is_empty());
        }

        let id = record.id.clone();
        check_outcome(ctx.store.update(record), &id)?;
        eprintln!("Updated bookmark {}", id);
        Ok(())
    }
}
