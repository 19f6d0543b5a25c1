use super::{AppContext, BookmarkCommand};
use mybookmarks::error::{MyBookmarksError, Result};
use mybookmarks::query::{present, Query};
use mybookmarks::{StorageBackend, ViewType};
use serde::{Deserialize, Serialize};

/// Show bookmarks grouped for a view.
///
/// Without filter flags the saved view state decides what is shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCommand {
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub domain: Option<String>,
    pub view: Option<String>,
}

impl ListCommand {
    fn has_filters(&self) -> bool {
        self.search.is_some() || !self.tags.is_empty() || self.domain.is_some()
    }

    /// The query and view type this listing runs with
    pub fn resolve<S: StorageBackend>(&self, ctx: &AppContext<S>) -> Result<(Query, ViewType)> {
        let view_type = match &self.view {
            Some(name) => ViewType::from_string(name).ok_or_else(|| {
                MyBookmarksError::InvalidInput(format!(
                    "Unknown view '{}' (expected 'domain' or 'tag')",
                    name
                ))
            })?,
            None => ctx.view.state().view_type,
        };

        if !self.has_filters() {
            return Ok((ctx.view.query(), view_type));
        }

        let mut query = Query::new()
            .with_search(self.search.as_deref().unwrap_or(""))
            .with_tags(self.tags.iter().cloned());
        if let Some(domain) = &self.domain {
            query = query.with_domain(domain.as_str());
        }
        Ok((query, view_type))
    }
}

impl BookmarkCommand for ListCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        let (query, view_type) = self.resolve(ctx)?;
        let groups = present(ctx.store.iter(), view_type, &query);

        if groups.is_empty() {
            if ctx.store.is_empty() {
                eprintln!("No bookmarks yet. Add one with `add <URL>` or import a file.");
            } else {
                eprintln!("No bookmarks match the current filters.");
            }
            return Ok(());
        }

        print!("{}", ctx.format.render_groups(&groups));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_env::TestEnv;
    use mybookmarks::BookmarkInput;

    fn seed(env: &TestEnv) {
        let mut ctx = env.ctx();
        ctx.store
            .add(BookmarkInput::new("https://rust-lang.org", "Rust").with_tags(["rust"]));
        ctx.store
            .add(BookmarkInput::new("https://go.dev", "Go").with_tags(["go"]));
    }

    #[test]
    fn test_resolve_uses_saved_view_without_flags() {
        let env = TestEnv::new();
        seed(&env);
        {
            let mut ctx = env.ctx();
            ctx.view.set_view_type(ViewType::Tag);
            ctx.view.toggle_tag("rust");
        }

        let ctx = env.ctx();
        let (query, view_type) = ListCommand::default().resolve(&ctx).unwrap();
        assert_eq!(view_type, ViewType::Tag);
        assert_eq!(query.selected_tags, vec!["rust"]);
    }

    #[test]
    fn test_resolve_flags_override_saved_filters() {
        let env = TestEnv::new();
        seed(&env);
        env.ctx().view.set_search_query("rust");

        let ctx = env.ctx();
        let cmd = ListCommand {
            domain: Some("go.dev".to_string()),
            ..ListCommand::default()
        };
        let (query, _) = cmd.resolve(&ctx).unwrap();
        assert_eq!(query.search_query, "");
        assert_eq!(query.selected_domain.as_deref(), Some("go.dev"));

        let groups = present(ctx.store.iter(), ViewType::Domain, &query);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "go.dev");
    }

    #[test]
    fn test_resolve_rejects_unknown_view() {
        let env = TestEnv::new();
        let ctx = env.ctx();
        let cmd = ListCommand {
            view: Some("grid".to_string()),
            ..ListCommand::default()
        };
        assert!(cmd.resolve(&ctx).is_err());
    }

    #[test]
    fn test_list_succeeds_on_empty_and_filtered() {
        let env = TestEnv::new();
        assert!(ListCommand::default().execute(&mut env.ctx()).is_ok());

        seed(&env);
        let cmd = ListCommand {
            search: Some("nothing-matches".to_string()),
            ..ListCommand::default()
        };
        assert!(cmd.execute(&mut env.ctx()).is_ok());
    }
}
