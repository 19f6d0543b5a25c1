use super::{AppContext, BookmarkCommand};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use mybookmarks::error::{MyBookmarksError, Result};
use mybookmarks::import_export::{self, ImportDiagnostic};
use mybookmarks::StorageBackend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn import_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}%")
        .map(|s| s.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message("Parsing bookmarks");
    pb
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportCommand {
    pub file: PathBuf,
}

impl BookmarkCommand for ImportCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        let pb = import_progress_bar();
        let output = import_export::import_file(&self.file, |pct| pb.set_position(pct as u64));
        pb.finish_and_clear();
        let output = output?;

        for diagnostic in &output.diagnostics {
            match diagnostic {
                ImportDiagnostic::CorruptInput(reason) => {
                    return Err(MyBookmarksError::ImportExport(format!(
                        "Could not read {}: {}",
                        self.file.display(),
                        reason
                    )));
                }
                ImportDiagnostic::SkippedEntry { reference, reason } => {
                    eprintln!("Warning: skipped {}: {}", reference, reason);
                }
            }
        }

        let skipped = output.skipped();
        let summary = ctx.store.import_candidates(output.into_inputs());
        eprintln!(
            "✓ Imported {} bookmark(s) from {} ({} already present, {} invalid, {} skipped)",
            summary.added,
            self.file.display(),
            summary.duplicates,
            summary.invalid,
            skipped
        );
        Ok(())
    }
}

/// Without a path the file lands in the configured export directory, named after today
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportCommand {
    pub file: Option<PathBuf>,
}

impl ExportCommand {
    pub fn target<S: StorageBackend>(&self, ctx: &AppContext<S>) -> PathBuf {
        match &self.file {
            Some(path) => path.clone(),
            None => ctx
                .config
                .export_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(import_export::export_file_name(Local::now().date_naive())),
        }
    }
}

impl BookmarkCommand for ExportCommand {
    fn execute<S: StorageBackend>(&self, ctx: &mut AppContext<S>) -> Result<()> {
        let path = self.target(ctx);
        let count = import_export::export_to_path(&ctx.store, &path)?;
        eprintln!("✓ Exported {} bookmark(s) to {}", count, path.display());
        Ok(())
    }
}
