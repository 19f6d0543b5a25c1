use super::helpers::{check_outcome, validate_tags};
use super::{AppContext, BookmarkCommand};
use crate::format::CountRow;
use crate::tag_ops::{apply_tag_operations, parse_tag_operations};
use mybookmarks::error::{MyBookmarksError, Result};
use mybookmarks::query::{available_tags, search_names, sorted_domains};
use mybookmarks::StorageBackend;
use serde::{Deserialize, Serialize};

/// Per-bookmark tag edits: `+tag`, `-tag`, `~old:new` or a bare tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCommand {
    pub id: String,
    pub ops: Vec<String>,
}

impl BookmarkCommand for TagCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        let operations = parse_tag_operations(&self.ops);
        if operations.is_empty() {
            return Err(MyBookmarksError::InvalidInput(
                "No valid tag operations given".to_string(),
            ));
        }

        let mut record = ctx.store.resolve_id(&self.id)?.clone();
        if !apply_tag_operations(&mut record, &operations) {
            eprintln!("Tags unchanged.");
            return Ok(());
        }

        let id = record.id.clone();
        let tags = record.tags.join(", ");
        check_outcome(ctx.store.update(record), &id)?;
        eprintln!("Tags for {}: {}", id, tags);
        Ok(())
    }
}

/// Rename a tag on every bookmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameTagCommand {
    pub old: String,
    pub new: String,
}

impl BookmarkCommand for RenameTagCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        validate_tags(std::slice::from_ref(&self.new))?;
        if self.new.is_empty() {
            return Err(MyBookmarksError::InvalidInput(
                "New tag name cannot be empty".to_string(),
            ));
        }

        let changed = ctx.store.rename_tag_everywhere(&self.old, &self.new);

        // Keep the tag filter pointing at the renamed tag
        let selected = &ctx.view.state().selected_tags;
        if changed > 0 && selected.contains(&self.old) {
            let mut renamed: Vec<String> = Vec::with_capacity(selected.len());
            for tag in selected {
                let tag = if *tag == self.old { &self.new } else { tag };
                if !renamed.contains(tag) {
                    renamed.push(tag.clone());
                }
            }
            ctx.view.set_selected_tags(renamed);
        }

        eprintln!(
            "Renamed '{}' to '{}' on {} bookmark(s).",
            self.old, self.new, changed
        );
        Ok(())
    }
}

/// Remove a tag from every bookmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTagCommand {
    pub tag: String,
}

impl BookmarkCommand for DeleteTagCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        let changed = ctx.store.delete_tag_everywhere(&self.tag);

        if ctx.view.state().selected_tags.contains(&self.tag) {
            let remaining = ctx
                .view
                .state()
                .selected_tags
                .iter()
                .filter(|t| **t != self.tag)
                .cloned()
                .collect();
            ctx.view.set_selected_tags(remaining);
        }

        eprintln!("Removed '{}' from {} bookmark(s).", self.tag, changed);
        Ok(())
    }
}

/// Tag list with counts, narrowed by the tags already selected in the view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsCommand {
    pub search: Option<String>,
}

impl BookmarkCommand for TagsCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        let selected = &ctx.view.state().selected_tags;
        let tags = available_tags(ctx.store.iter(), selected);
        let tags = search_names(tags, self.search.as_deref().unwrap_or(""), |t| t.name.as_str());

        let rows: Vec<CountRow> = tags
            .iter()
            .map(|t| CountRow {
                name: &t.name,
                count: t.count,
            })
            .collect();
        print!("{}", ctx.format.render_counts(&rows));
        Ok(())
    }
}

/// Domain list with counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainsCommand {
    pub search: Option<String>,
}

impl BookmarkCommand for DomainsCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        let domains = sorted_domains(ctx.store.all_domains());
        let domains = search_names(domains, self.search.as_deref().unwrap_or(""), |d| d.name.as_str());

        let rows: Vec<CountRow> = domains
            .iter()
            .map(|d| CountRow {
                name: &d.name,
                count: d.count,
            })
            .collect();
        print!("{}", ctx.format.render_counts(&rows));
        Ok(())
    }
}
