//! Conversion of bookmark files into candidate records.
//!
//! Parsing never touches the store. Callers hand the candidates to
//! `BookmarkStore::import_candidates`, which owns de-duplication by URL.

use crate::effects::{Clock, SystemClock};
use crate::error::{MyBookmarksError, Result};
use crate::models::bookmark::{dedup_tags, default_favicon, domain_for, extract_domain, BookmarkInput};
use crate::snapshot::StoredShape;
use crate::tags::{folder_tag, is_export_root, parse_tags};
use crate::utils::decode_entities;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tl::{HTMLTag, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// Netscape bookmark file as exported by browsers
    Html,
    /// Our own URL-keyed JSON export
    Json,
}

impl ImportFormat {
    /// Pick a format from the MIME type when given, else from the file extension
    pub fn detect(file_name: &str, mime: Option<&str>) -> Option<Self> {
        let mime = mime
            .and_then(|m| m.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase());
        match mime.as_deref() {
            Some("text/html") => return Some(ImportFormat::Html),
            Some("application/json") => return Some(ImportFormat::Json),
            _ => {}
        }

        let name = file_name.to_ascii_lowercase();
        if name.ends_with(".html") {
            Some(ImportFormat::Html)
        } else if name.ends_with(".json") {
            Some(ImportFormat::Json)
        } else {
            None
        }
    }
}

/// A parsed record that has not been inserted anywhere yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBookmark {
    pub url: String,
    pub title: String,
    pub description: String,
    pub domain: String,
    pub favicon: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ParsedBookmark> for BookmarkInput {
    fn from(parsed: ParsedBookmark) -> Self {
        BookmarkInput {
            url: parsed.url,
            title: parsed.title,
            description: parsed.description,
            favicon: Some(parsed.favicon),
            tags: parsed.tags,
            created_at: Some(parsed.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDiagnostic {
    /// The whole input was unreadable; no records could be produced
    CorruptInput(String),
    /// One entry was dropped and the scan went on
    SkippedEntry { reference: String, reason: String },
}

/// Candidates plus what went wrong while producing them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutput {
    pub bookmarks: Vec<ParsedBookmark>,
    pub diagnostics: Vec<ImportDiagnostic>,
}

impl ParseOutput {
    fn corrupt(reason: impl Into<String>) -> Self {
        Self {
            bookmarks: Vec::new(),
            diagnostics: vec![ImportDiagnostic::CorruptInput(reason.into())],
        }
    }

    fn skip(&mut self, reference: impl Into<String>, reason: impl Into<String>) {
        let (reference, reason) = (reference.into(), reason.into());
        log::warn!("Skipping {}: {}", reference, reason);
        self.diagnostics
            .push(ImportDiagnostic::SkippedEntry { reference, reason });
    }

    /// True when the input could not be read at all, as opposed to holding no bookmarks
    pub fn is_corrupt(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, ImportDiagnostic::CorruptInput(_)))
    }

    pub fn skipped(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, ImportDiagnostic::SkippedEntry { .. }))
            .count()
    }

    pub fn into_inputs(self) -> impl Iterator<Item = BookmarkInput> {
        self.bookmarks.into_iter().map(BookmarkInput::from)
    }
}

/// Percentage reported after item `done` of `total`
fn percent(done: usize, total: usize) -> u8 {
    ((done as f64 / total as f64) * 100.0).round() as u8
}

/// Matches comments and start tags whole, so a `</DL>` inside either is never taken as a close
fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?is)<!--.*?-->|</dl\s*>|<[a-z!?][^>"']*(?:(?:"[^"]*"|'[^']*')[^>"']*)*>"#)
            .expect("static pattern is valid")
    })
}

/// Structural events of a Netscape file in source order
enum Event<'t, 'a> {
    ListOpen,
    ListClose,
    Item,
    Heading(String),
    Anchor(&'t HTMLTag<'a>),
}

fn attribute(tag: &HTMLTag, names: [&'static str; 2]) -> Option<String> {
    names
        .iter()
        .find_map(|name| tag.attributes().get(*name).flatten())
        .map(|value| decode_entities(value.as_utf8_str().trim()))
}

fn is_named(tag: &HTMLTag, name: &str) -> bool {
    tag.name().as_utf8_str().eq_ignore_ascii_case(name)
}

fn heading_tag<'a>(heading: &HTMLTag<'a>, parser: &tl::Parser<'a>) -> String {
    folder_tag(&decode_entities(heading.inner_text(parser).trim()))
}

/// Anchors in source order, each with its enclosing folders innermost first
type FolderedAnchors<'t, 'a> = Vec<(&'t HTMLTag<'a>, Vec<String>)>;

/// Folder scoping for Netscape files: an `H3` names the `DL` list that follows it.
///
/// tl never closes `<DT>` or `<p>` implicitly, so its tree cannot be trusted for `</DL>`.
/// Openings come from the DOM and closes from a scan that steps over comments and tags.
fn anchors_by_list<'t, 'a>(
    nodes: &'t [Node<'a>],
    parser: &tl::Parser<'a>,
    html: &str,
) -> FolderedAnchors<'t, 'a> {
    let mut events: Vec<(usize, Event)> = Vec::new();
    for tag in nodes.iter().filter_map(Node::as_tag) {
        let offset = tag.boundaries(parser).0;
        let event = if is_named(tag, "dl") {
            Event::ListOpen
        } else if is_named(tag, "dt") {
            Event::Item
        } else if is_named(tag, "h3") {
            Event::Heading(heading_tag(tag, parser))
        } else if is_named(tag, "a") {
            Event::Anchor(tag)
        } else {
            continue;
        };
        events.push((offset, event));
    }
    events.extend(
        markup_pattern()
            .find_iter(html)
            .filter(|m| m.as_str().starts_with("</"))
            .map(|m| (m.start(), Event::ListClose)),
    );
    events.sort_by_key(|(offset, _)| *offset);

    let mut anchors = Vec::new();
    let mut folder_stack: Vec<Option<String>> = Vec::new();
    let mut pending_folder: Option<String> = None;
    for (_, event) in events {
        match event {
            Event::Heading(name) => pending_folder = Some(name),
            Event::Item => pending_folder = None,
            Event::ListOpen => folder_stack.push(pending_folder.take()),
            Event::ListClose => {
                folder_stack.pop();
            }
            Event::Anchor(tag) => {
                let folders = folder_stack.iter().rev().flatten().cloned().collect();
                anchors.push((tag, folders));
            }
        }
    }
    anchors
}

/// Folder scoping for markup without lists: every ancestor holding an `h3` names a folder
fn anchors_by_ancestor<'t, 'a>(
    nodes: &'t [Node<'a>],
    parser: &tl::Parser<'a>,
) -> FolderedAnchors<'t, 'a> {
    let mut parents: Vec<Option<usize>> = vec![None; nodes.len()];
    for (index, tag) in nodes
        .iter()
        .enumerate()
        .filter_map(|(i, node)| node.as_tag().map(|tag| (i, tag)))
    {
        for child in tag.children().top().iter() {
            if let Some(slot) = parents.get_mut(child.get_inner() as usize) {
                *slot = Some(index);
            }
        }
    }

    let first_heading = |tag: &HTMLTag<'a>| {
        tag.children()
            .all(parser)
            .iter()
            .filter_map(Node::as_tag)
            .find(|t| is_named(t, "h3"))
            .map(|h| heading_tag(h, parser))
    };

    nodes
        .iter()
        .enumerate()
        .filter_map(|(i, node)| node.as_tag().filter(|t| is_named(t, "a")).map(|t| (i, t)))
        .map(|(index, anchor)| {
            let mut folders = Vec::new();
            let mut current = parents.get(index).copied().flatten();
            while let Some(ancestor) = current {
                if let Some(name) = nodes
                    .get(ancestor)
                    .and_then(Node::as_tag)
                    .and_then(|tag| first_heading(tag))
                {
                    folders.push(name);
                }
                current = parents.get(ancestor).copied().flatten();
            }
            (anchor, folders)
        })
        .collect()
}

pub fn parse_html<F: FnMut(u8)>(html: &str, progress: F) -> ParseOutput {
    parse_html_with(html, &SystemClock, progress)
}

/// Parse a browser bookmark export.
///
/// An anchor is tagged with every enclosing folder, innermost first. In a Netscape file
/// each `H3` heading names the `DL` list that follows it. Markup without lists falls back
/// to the first `h3` inside each ancestor. Container folders such as the bookmarks bar are
/// dropped. Tags from a `TAGS` attribute follow the folder tags.
pub fn parse_html_with<F: FnMut(u8)>(html: &str, clock: &dyn Clock, mut progress: F) -> ParseOutput {
    let dom = match tl::parse(html, tl::ParserOptions::default()) {
        Ok(dom) => dom,
        Err(e) => {
            log::warn!("Failed to parse bookmark HTML: {}", e);
            return ParseOutput::corrupt(e.to_string());
        }
    };
    let parser = dom.parser();
    let nodes = dom.nodes();

    if !nodes.iter().any(|node| node.as_tag().is_some()) {
        return ParseOutput::corrupt("no HTML markup found");
    }
    let has_lists = nodes
        .iter()
        .filter_map(Node::as_tag)
        .any(|t| is_named(t, "dl"));
    let anchors = if has_lists {
        anchors_by_list(nodes, parser, html)
    } else {
        log::debug!("No bookmark lists found, reading folders from ancestors");
        anchors_by_ancestor(nodes, parser)
    };

    let total = anchors.len();
    let mut output = ParseOutput::default();
    for (seen, (tag, folders)) in anchors.into_iter().enumerate() {
        if let Some(bookmark) = read_anchor(tag, parser, &folders, clock, &mut output) {
            output.bookmarks.push(bookmark);
        }
        progress(percent(seen + 1, total));
    }

    log::debug!(
        "Parsed {} bookmark(s) from {} link(s) in HTML",
        output.bookmarks.len(),
        total
    );
    output
}

fn read_anchor<'a>(
    tag: &HTMLTag<'a>,
    parser: &tl::Parser<'a>,
    folders: &[String],
    clock: &dyn Clock,
    output: &mut ParseOutput,
) -> Option<ParsedBookmark> {
    let url = attribute(tag, ["HREF", "href"]).filter(|u| !u.is_empty())?;
    let title = decode_entities(tag.inner_text(parser).trim());
    if title.is_empty() || !url.starts_with("http") {
        log::debug!("Ignoring link {}", url);
        return None;
    }
    let Some(domain) = extract_domain(&url) else {
        output.skip(url, "invalid URL");
        return None;
    };

    let folder_tags = folders
        .iter()
        .filter(|name| !name.is_empty() && !is_export_root(name))
        .cloned();
    let attribute_tags = attribute(tag, ["TAGS", "tags"])
        .map(|list| parse_tags(&list))
        .unwrap_or_default();

    let created_at = attribute(tag, ["ADD_DATE", "add_date"])
        .and_then(|secs| secs.parse::<i64>().ok())
        .filter(|secs| *secs > 0)
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(|| clock.now());

    Some(ParsedBookmark {
        favicon: default_favicon(&domain),
        tags: dedup_tags(folder_tags.chain(attribute_tags)),
        url,
        title,
        description: String::new(),
        domain,
        created_at,
    })
}

pub fn parse_json<F: FnMut(u8)>(json: &str, progress: F) -> ParseOutput {
    parse_json_with(json, &SystemClock, progress)
}

/// Parse an export produced by `export_json`, or the older array layout.
pub fn parse_json_with<F: FnMut(u8)>(json: &str, clock: &dyn Clock, mut progress: F) -> ParseOutput {
    let shape = match StoredShape::parse(json) {
        Ok(shape) => shape,
        Err(e) => {
            log::warn!("Failed to parse bookmark JSON: {}", e);
            return ParseOutput::corrupt(e.to_string());
        }
    };

    let entries = shape.into_entries();
    let total = entries.len();
    let mut output = ParseOutput::default();

    for (index, entry) in entries.into_iter().enumerate() {
        match entry.record {
            Ok(record) => match record.required_fields() {
                Some((url, title)) => {
                    let domain = domain_for(url);
                    output.bookmarks.push(ParsedBookmark {
                        url: url.to_string(),
                        title: title.to_string(),
                        description: record.description.clone().unwrap_or_default(),
                        favicon: record
                            .favicon
                            .clone()
                            .filter(|f| !f.is_empty())
                            .unwrap_or_else(|| default_favicon(&domain)),
                        domain,
                        tags: dedup_tags(record.tags.clone().unwrap_or_default()),
                        created_at: record.created_at().unwrap_or_else(|| clock.now()),
                    });
                }
                None => output.skip(entry.reference, "missing url or title"),
            },
            Err(reason) => output.skip(entry.reference, reason),
        }
        progress(percent(index + 1, total));
    }

    log::debug!("Parsed {} bookmark(s) from JSON", output.bookmarks.len());
    output
}

pub fn parse_bookmarks<F: FnMut(u8)>(format: ImportFormat, content: &str, progress: F) -> ParseOutput {
    match format {
        ImportFormat::Html => parse_html(content, progress),
        ImportFormat::Json => parse_json(content, progress),
    }
}

/// Read a file and parse it according to its extension.
/// Unsupported file types are rejected before the file is read.
pub fn import_file<F: FnMut(u8)>(path: &Path, progress: F) -> Result<ParseOutput> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = ImportFormat::detect(&file_name, None).ok_or_else(|| {
        MyBookmarksError::ImportExport(format!(
            "Unsupported import file '{}': expected .html or .json",
            path.display()
        ))
    })?;

    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(parse_bookmarks(format, &content, progress))
}
