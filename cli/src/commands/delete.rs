use super::helpers::{check_outcome, confirm};
use super::{AppContext, BookmarkCommand};
use mybookmarks::error::Result;
use mybookmarks::StorageBackend;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCommand {
    pub ids: Vec<String>,
    pub force: bool,
}

impl BookmarkCommand for DeleteCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        // Resolve everything first so a bad id deletes nothing
        let mut targets: Vec<(String, String, String)> = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            let bookmark = ctx.store.resolve_id(id)?;
            if !targets.iter().any(|(target, _, _)| *target == bookmark.id) {
                targets.push((bookmark.id.clone(), bookmark.title.clone(), bookmark.url.clone()));
            }
        }

        if targets.is_empty() {
            eprintln!("No bookmarks to delete.");
            return Ok(());
        }

        eprintln!("Bookmarks to be deleted:");
        for (id, title, url) in &targets {
            eprintln!("  {}. {} - {}", id, title, url);
        }

        let confirmed =
            self.force || confirm(&format!("\nDelete {} bookmark(s)? [y/N]: ", targets.len()))?;
        if !confirmed {
            eprintln!("Deletion cancelled.");
            return Ok(());
        }

        for (id, _, _) in &targets {
            check_outcome(ctx.store.delete(id), id)?;
        }
        eprintln!("Deleted {} bookmark(s).", targets.len());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearCommand {
    pub force: bool,
}

impl BookmarkCommand for ClearCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        let count = ctx.store.len();
        if count == 0 {
            eprintln!("No bookmarks to delete.");
            return Ok(());
        }

        let confirmed =
            self.force || confirm(&format!("\nDELETE ALL {} bookmark(s)? [y/N]: ", count))?;
        if !confirmed {
            eprintln!("Deletion cancelled.");
            return Ok(());
        }

        ctx.store.clear();
        eprintln!("Deleted {} bookmark(s).", count);
        Ok(())
    }
}
