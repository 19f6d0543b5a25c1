use crate::format::OutputFormat;
use mybookmarks::config::Config;
use mybookmarks::error::Result;
use mybookmarks::{BookmarkStore, StorageBackend, ViewSession};

/// Everything a command needs; store and view share one storage backend.
pub struct AppContext<S: StorageBackend> {
    pub store: BookmarkStore<S>,
    pub view: ViewSession<S>,
    pub config: Config,
    pub format: OutputFormat,
}

pub mod add;
pub mod delete;
pub mod helpers;
pub mod import_export;
pub mod list;
pub mod tag;
pub mod update;
pub mod view;

pub trait BookmarkCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()>;
}

/// Enum-based dispatch for commands (avoids Box<dyn BookmarkCommand>)
pub enum CommandEnum {
    Add(add::AddCommand),
    Update(update::UpdateCommand),
    Delete(delete::DeleteCommand),
    Clear(delete::ClearCommand),
    Tag(tag::TagCommand),
    RenameTag(tag::RenameTagCommand),
    DeleteTag(tag::DeleteTagCommand),
    Tags(tag::TagsCommand),
    Domains(tag::DomainsCommand),
    List(list::ListCommand),
    Import(import_export::ImportCommand),
    Export(import_export::ExportCommand),
    View(view::ViewCommand),
}

impl CommandEnum {
    pub fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        match self {
            Self::Add(cmd) => cmd.execute(ctx),
            Self::Update(cmd) => cmd.execute(ctx),
            Self::Delete(cmd) => cmd.execute(ctx),
            Self::Clear(cmd) => cmd.execute(ctx),
            Self::Tag(cmd) => cmd.execute(ctx),
            Self::RenameTag(cmd) => cmd.execute(ctx),
            Self::DeleteTag(cmd) => cmd.execute(ctx),
            Self::Tags(cmd) => cmd.execute(ctx),
            Self::Domains(cmd) => cmd.execute(ctx),
            Self::List(cmd) => cmd.execute(ctx),
            Self::Import(cmd) => cmd.execute(ctx),
            Self::Export(cmd) => cmd.execute(ctx),
            Self::View(cmd) => cmd.execute(ctx),
        }
    }
}
