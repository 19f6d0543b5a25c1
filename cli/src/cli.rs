use crate::commands::{
    add, delete, import_export, list, tag, update, view, AppContext, CommandEnum,
};
use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use mybookmarks::config::Config;
use mybookmarks::error::Result;
use mybookmarks::{BookmarkStore, StorageBackend, ViewSession};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional custom database file path
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Optional custom configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable color output
    #[arg(long)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,

    /// Output format: colored, plain or json
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new bookmark
    Add {
        /// URL to bookmark
        url: String,

        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tag: Option<Vec<String>>,

        /// Bookmark title (defaults to the URL)
        #[arg(long)]
        title: Option<String>,

        /// Notes or description
        #[arg(short, long)]
        comment: Option<String>,

        /// Favicon URL (defaults to https://<domain>/favicon.ico)
        #[arg(long)]
        favicon: Option<String>,
    },

    /// Update fields of an existing bookmark
    Update {
        /// Bookmark ID or unambiguous ID prefix
        id: String,

        /// New URL
        #[arg(long)]
        url: Option<String>,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        comment: Option<String>,

        /// New favicon URL; pass an empty string to fall back to the default
        #[arg(long)]
        favicon: Option<String>,
    },

    /// Delete bookmark(s)
    Delete {
        /// Bookmark IDs or unambiguous ID prefixes
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete every bookmark
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Edit the tags of one bookmark
    Tag {
        /// Bookmark ID or unambiguous ID prefix
        id: String,

        /// Tag operations (supports: +add, -remove, ~old:new, or plain tag to add)
        /// Examples: +urgent, -archived, ~todo:done
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, trailing_var_arg = true)]
        ops: Vec<String>,
    },

    /// Rename a tag on every bookmark
    RenameTag { old: String, new: String },

    /// Remove a tag from every bookmark
    DeleteTag { tag: String },

    /// List tags with counts, narrowed by the tags selected in the view
    Tags {
        /// Only show tags containing this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List domains with counts
    Domains {
        /// Only show domains containing this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List bookmarks; without filters the saved view state is used
    List {
        /// Match text in title, description or URL
        #[arg(short, long)]
        search: Option<String>,

        /// Require this tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Only bookmarks from this domain
        #[arg(short, long)]
        domain: Option<String>,

        /// Group by `domain` or show a single `tag` list
        #[arg(long)]
        view: Option<String>,
    },

    /// Import bookmarks from a browser HTML export or a JSON export
    Import {
        /// File path to import from (.html or .json)
        file: PathBuf,
    },

    /// Export bookmarks to a JSON file
    Export {
        /// File path to export to (defaults to mybookmarks_<date>.json)
        file: Option<PathBuf>,
    },

    /// Show or change the saved view state
    View {
        #[command(subcommand)]
        action: Option<ViewCommands>,
    },
}

#[derive(Subcommand)]
pub enum ViewCommands {
    /// Print the current view state
    Show,
    /// Switch between the `domain` and `tag` views
    Type { name: String },
    /// Set the search text; omit to clear it
    Search { query: Option<String> },
    /// Select or deselect a tag
    Tag { tag: String },
    /// Select or deselect a domain
    Domain { domain: String },
    /// Clear search text and selections
    Reset,
    /// Open or close the settings panel; omit to toggle
    Settings { open: Option<bool> },
}

impl From<ViewCommands> for view::ViewAction {
    fn from(cmd: ViewCommands) -> Self {
        match cmd {
            ViewCommands::Show => Self::Show,
            ViewCommands::Type { name } => Self::Type(name),
            ViewCommands::Search { query } => Self::Search(query),
            ViewCommands::Tag { tag } => Self::Tag(tag),
            ViewCommands::Domain { domain } => Self::Domain(domain),
            ViewCommands::Reset => Self::Reset,
            ViewCommands::Settings { open } => Self::Settings(open),
        }
    }
}

impl From<Commands> for CommandEnum {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Add {
                url,
                tag,
                title,
                comment,
                favicon,
            } => CommandEnum::Add(add::AddCommand {
                url,
                tag,
                title,
                comment,
                favicon,
            }),
            Commands::Update {
                id,
                url,
                title,
                comment,
                favicon,
            } => CommandEnum::Update(update::UpdateCommand {
                id,
                url,
                title,
                comment,
                favicon,
            }),
            Commands::Delete { ids, force } => {
                CommandEnum::Delete(delete::DeleteCommand { ids, force })
            }
            Commands::Clear { force } => CommandEnum::Clear(delete::ClearCommand { force }),
            Commands::Tag { id, ops } => CommandEnum::Tag(tag::TagCommand { id, ops }),
            Commands::RenameTag { old, new } => {
                CommandEnum::RenameTag(tag::RenameTagCommand { old, new })
            }
            Commands::DeleteTag { tag } => CommandEnum::DeleteTag(tag::DeleteTagCommand { tag }),
            Commands::Tags { search } => CommandEnum::Tags(tag::TagsCommand { search }),
            Commands::Domains { search } => CommandEnum::Domains(tag::DomainsCommand { search }),
            Commands::List {
                search,
                tags,
                domain,
                view,
            } => CommandEnum::List(list::ListCommand {
                search,
                tags,
                domain,
                view,
            }),
            Commands::Import { file } => {
                CommandEnum::Import(import_export::ImportCommand { file })
            }
            Commands::Export { file } => {
                CommandEnum::Export(import_export::ExportCommand { file })
            }
            Commands::View { action } => CommandEnum::View(view::ViewCommand {
                action: action.map(Into::into).unwrap_or(view::ViewAction::Show),
            }),
        }
    }
}

pub fn handle_args<B: StorageBackend>(cli: Cli, storage: &B, config: Config) -> Result<()> {
    let format_name = cli
        .format
        .clone()
        .unwrap_or_else(|| config.default_format.clone());
    let mut ctx = AppContext {
        store: BookmarkStore::load(storage),
        view: ViewSession::load(storage),
        format: OutputFormat::resolve(&format_name, cli.nc),
        config,
    };

    let command = match cli.command {
        Some(command) => CommandEnum::from(command),
        // No subcommand: show the saved view
        None => CommandEnum::List(list::ListCommand::default()),
    };
    command.execute(&mut ctx)
}
