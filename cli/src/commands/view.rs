use super::{AppContext, BookmarkCommand};
use crate::format::{json, OutputFormat};
use mybookmarks::error::{MyBookmarksError, Result};
use mybookmarks::{StorageBackend, ViewState, ViewType};
use serde::{Deserialize, Serialize};

/// Changes to the saved view state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewAction {
    Show,
    Type(String),
    /// `None` clears the search text
    Search(Option<String>),
    Tag(String),
    Domain(String),
    Reset,
    /// `None` flips the panel
    Settings(Option<bool>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewCommand {
    pub action: ViewAction,
}

fn describe(state: &ViewState, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return json::to_json(state);
    }
    let tags = if state.selected_tags.is_empty() {
        "-".to_string()
    } else {
        state.selected_tags.join(", ")
    };
    format!(
        "view:     {}\nsearch:   {}\ntags:     {}\ndomain:   {}\nsettings: {}\n",
        state.view_type.as_str(),
        if state.search_query.is_empty() { "-" } else { state.search_query.as_str() },
        tags,
        state.selected_domain.as_deref().unwrap_or("-"),
        if state.is_settings_open { "open" } else { "closed" },
    )
}

impl BookmarkCommand for ViewCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        let view = &mut ctx.view;
        match &self.action {
            ViewAction::Show => {}
            ViewAction::Type(name) => {
                let view_type = ViewType::from_string(name).ok_or_else(|| {
                    MyBookmarksError::InvalidInput(format!(
                        "Unknown view '{}' (expected 'domain' or 'tag')",
                        name
                    ))
                })?;
                view.set_view_type(view_type);
            }
            ViewAction::Search(query) => view.set_search_query(query.as_deref().unwrap_or("")),
            ViewAction::Tag(tag) => view.toggle_tag(tag),
            ViewAction::Domain(domain) => view.toggle_domain(domain),
            ViewAction::Reset => view.reset_filters(),
            ViewAction::Settings(Some(open)) => view.set_settings_open(*open),
            ViewAction::Settings(None) => view.toggle_settings(),
        }

        print!("{}", describe(ctx.view.state(), ctx.format));
        Ok(())
    }
}
