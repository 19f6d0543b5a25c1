mod cli;
mod commands;
mod format;
mod output;
mod tag_ops;

use clap::Parser;
use env_logger::Env;
use mybookmarks::config::Config;
use mybookmarks::error::Result;
use mybookmarks::SqliteStorage;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Initialize logger; --debug overrides RUST_LOG
    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    // Load configuration
    let cfg = if let Some(config_path) = &args.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load()
    };

    let db_path = args.db.clone().unwrap_or_else(|| cfg.database_path());
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    log::debug!("Using database {}", db_path.display());

    let storage = SqliteStorage::init(&db_path)?;
    cli::handle_args(args, &storage, cfg)
}
