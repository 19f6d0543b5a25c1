//! Tag and domain counts derived from the bookmark collection on every call.

use crate::models::Bookmark;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    pub name: String,
    pub count: usize,
}

/// Count occurrences of each key, keeping first-seen order
fn count_by<'a, I, F, K>(bookmarks: I, mut keys: F) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Bookmark>,
    F: FnMut(&'a Bookmark) -> K,
    K: IntoIterator<Item = &'a str>,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for bookmark in bookmarks {
        for key in keys(bookmark) {
            match positions.get(key) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    positions.insert(key, counts.len());
                    counts.push((key.to_string(), 1));
                }
            }
        }
    }
    counts
}

pub fn tag_counts<'a, I>(bookmarks: I) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a Bookmark>,
{
    count_by(bookmarks, |b| b.tags.iter().map(String::as_str))
        .into_iter()
        .map(|(name, count)| TagCount { name, count })
        .collect()
}

pub fn domain_counts<'a, I>(bookmarks: I) -> Vec<DomainCount>
where
    I: IntoIterator<Item = &'a Bookmark>,
{
    count_by(bookmarks, |b| std::iter::once(b.domain.as_str()))
        .into_iter()
        .map(|(name, count)| DomainCount { name, count })
        .collect()
}
