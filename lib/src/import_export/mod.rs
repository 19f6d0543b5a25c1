pub mod export;
pub mod import;

pub use export::{export_file_name, export_json, export_to_path};
pub use import::{
    import_file, parse_bookmarks, parse_html, parse_json, ImportDiagnostic, ImportFormat,
    ParseOutput, ParsedBookmark,
};
