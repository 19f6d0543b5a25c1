//! Filtering, sorting and grouping of bookmarks for display.

use crate::index::{self, DomainCount, TagCount};
use crate::models::{Bookmark, ViewType};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Name of the single group produced by the tag view
pub const ALL_BOOKMARKS: &str = "All Bookmarks";

/// Active filters. All of them must hold for a bookmark to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Case-insensitive substring of title, description or URL
    pub search_query: String,
    /// Every one of these tags must be present
    pub selected_tags: Vec<String>,
    pub selected_domain: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search_query = search.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.selected_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.selected_domain = Some(domain.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty()
            && self.selected_tags.is_empty()
            && self.selected_domain.is_none()
    }

    pub fn matches(&self, bookmark: &Bookmark) -> bool {
        self.matcher().matches(bookmark)
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            needle: self.search_query.to_lowercase(),
            query: self,
        }
    }
}

/// Query with the search text lowercased once
struct Matcher<'q> {
    needle: String,
    query: &'q Query,
}

impl Matcher<'_> {
    fn matches(&self, bookmark: &Bookmark) -> bool {
        self.matches_search(bookmark)
            && self.query.selected_tags.iter().all(|t| bookmark.has_tag(t))
            && self
                .query
                .selected_domain
                .as_deref()
                .map_or(true, |d| d == bookmark.domain)
    }

    fn matches_search(&self, bookmark: &Bookmark) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [&bookmark.title, &bookmark.description, &bookmark.url]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Case-insensitive ordering with a byte-wise tiebreak so the order is total
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Bookmarks matching `query`, in input order
pub fn filter<'a, I>(bookmarks: I, query: &Query) -> Vec<&'a Bookmark>
where
    I: IntoIterator<Item = &'a Bookmark>,
{
    let matcher = query.matcher();
    bookmarks
        .into_iter()
        .filter(|b| matcher.matches(b))
        .collect()
}

/// Stable sort by domain
pub fn sort_by_domain(bookmarks: &mut [&Bookmark]) {
    bookmarks.sort_by(|a, b| locale_cmp(&a.domain, &b.domain));
}

pub fn filter_sorted<'a, I>(bookmarks: I, query: &Query) -> Vec<&'a Bookmark>
where
    I: IntoIterator<Item = &'a Bookmark>,
{
    let mut matched = filter(bookmarks, query);
    sort_by_domain(&mut matched);
    matched
}

/// A named run of bookmarks as shown in one section of the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkGroup<'a> {
    pub name: String,
    pub bookmarks: Vec<&'a Bookmark>,
}

/// Group by domain; groups ordered by domain, members by title.
pub fn group_by_domain<'a>(bookmarks: &[&'a Bookmark]) -> Vec<BookmarkGroup<'a>> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<BookmarkGroup<'a>> = Vec::new();
    for &bookmark in bookmarks {
        match positions.get(bookmark.domain.as_str()) {
            Some(&pos) => groups[pos].bookmarks.push(bookmark),
            None => {
                positions.insert(bookmark.domain.as_str(), groups.len());
                groups.push(BookmarkGroup {
                    name: bookmark.domain.clone(),
                    bookmarks: vec![bookmark],
                });
            }
        }
    }

    for group in &mut groups {
        group.bookmarks.sort_by(|a, b| locale_cmp(&a.title, &b.title));
    }
    groups.sort_by(|a, b| locale_cmp(&a.name, &b.name));
    groups
}

/// Filter, sort and group for the given view.
///
/// The domain view yields one group per domain. The tag view yields a single
/// `All Bookmarks` group sorted by title, keeping domain order for equal titles.
/// No groups are returned when nothing matches.
pub fn present<'a, I>(bookmarks: I, view_type: ViewType, query: &Query) -> Vec<BookmarkGroup<'a>>
where
    I: IntoIterator<Item = &'a Bookmark>,
{
    let mut matched = filter_sorted(bookmarks, query);
    match view_type {
        ViewType::Domain => group_by_domain(&matched),
        ViewType::Tag => {
            if matched.is_empty() {
                return Vec::new();
            }
            matched.sort_by(|a, b| locale_cmp(&a.title, &b.title));
            vec![BookmarkGroup {
                name: ALL_BOOKMARKS.to_string(),
                bookmarks: matched,
            }]
        }
    }
}

/// Tags that can still be added to `selected` without emptying the result.
///
/// With nothing selected every tag is offered. Otherwise a tag stays when some bookmark
/// carries it together with all selected tags; selected tags are always kept so they can
/// be deselected. Counts are over the whole collection, sorted by name.
pub fn available_tags<'a, I>(bookmarks: I, selected: &[String]) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a Bookmark>,
{
    let bookmarks: Vec<&Bookmark> = bookmarks.into_iter().collect();
    let all = sorted_tags(index::tag_counts(bookmarks.iter().copied()));
    if selected.is_empty() {
        return all;
    }

    let narrowed: Vec<&Bookmark> = bookmarks
        .into_iter()
        .filter(|b| selected.iter().all(|t| b.has_tag(t)))
        .collect();
    all.into_iter()
        .filter(|tag| {
            selected.contains(&tag.name) || narrowed.iter().any(|b| b.has_tag(&tag.name))
        })
        .collect()
}

/// Case-insensitive substring filter over names, used for the sidebar lists
pub fn search_names<T, F>(items: Vec<T>, needle: &str, name: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| name(item).to_lowercase().contains(&needle))
        .collect()
}

pub fn sorted_tags(mut tags: Vec<TagCount>) -> Vec<TagCount> {
    tags.sort_by(|a, b| locale_cmp(&a.name, &b.name));
    tags
}

pub fn sorted_domains(mut domains: Vec<DomainCount>) -> Vec<DomainCount> {
    domains.sort_by(|a, b| locale_cmp(&a.name, &b.name));
    domains
}
