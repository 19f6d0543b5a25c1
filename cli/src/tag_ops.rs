use mybookmarks::models::Bookmark;

/// Tag operation types
#[derive(Debug, PartialEq, Clone)]
pub enum TagOp {
    /// Add a tag (prefix: +)
    Add(String),
    /// Remove a tag (prefix: -)
    Remove(String),
    /// Replace a tag (format: ~old:new)
    Replace { old: String, new: String },
}

/// Parse tag operations from command line arguments
///
/// Syntax:
/// - `+tag` - Add tag
/// - `-tag` - Remove tag
/// - `~old:new` - Replace old tag with new tag
/// - `tag` - Add tag (no prefix = add)
pub fn parse_tag_operations(tags: &[String]) -> Vec<TagOp> {
    let mut operations = Vec::new();
    let mut invalid_tags = Vec::new();
    let mut invalid_syntax = Vec::new();

    for tag in tags {
        if tag.is_empty() {
            continue;
        }

        if let Some(tag_name) = tag.strip_prefix('+') {
            if tag_name.contains(' ') {
                invalid_tags.push(tag.clone());
            } else if !tag_name.is_empty() {
                operations.push(TagOp::Add(tag_name.to_string()));
            }
        } else if let Some(tag_name) = tag.strip_prefix('-') {
            if tag_name.contains(' ') {
                invalid_tags.push(tag.clone());
            } else if !tag_name.is_empty() {
                operations.push(TagOp::Remove(tag_name.to_string()));
            }
        } else if let Some(replace_spec) = tag.strip_prefix('~') {
            match replace_spec.split_once(':') {
                Some((old, new)) if old.contains(' ') || new.contains(' ') => {
                    invalid_tags.push(tag.clone());
                }
                Some((old, new)) if !old.is_empty() && !new.is_empty() => {
                    operations.push(TagOp::Replace {
                        old: old.to_string(),
                        new: new.to_string(),
                    });
                }
                _ => invalid_syntax.push(tag.clone()),
            }
        } else if tag.contains(' ') {
            invalid_tags.push(tag.clone());
        } else {
            operations.push(TagOp::Add(tag.to_string()));
        }
    }

    if !invalid_tags.is_empty() {
        eprintln!(
            "Warning: The following tags contain spaces and were ignored: {}",
            invalid_tags.join(", ")
        );
    }

    if !invalid_syntax.is_empty() {
        eprintln!(
            "Warning: Invalid replace syntax (expected '~old:new'): {}",
            invalid_syntax.join(", ")
        );
    }

    operations
}

/// Apply tag operations to a bookmark copy. Returns true when its tags changed.
///
/// Replacing merges into an existing tag of the new name, as renaming does store-wide.
pub fn apply_tag_operations(bookmark: &mut Bookmark, operations: &[TagOp]) -> bool {
    let mut changed = false;
    for op in operations {
        changed |= match op {
            TagOp::Add(tag) => bookmark.add_tag(tag),
            TagOp::Remove(tag) => bookmark.remove_tag(tag),
            TagOp::Replace { old, new } => old != new && bookmark.rename_tag(old, new),
        };
    }
    changed
}
