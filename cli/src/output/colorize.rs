use crate::format::plain::short_id;
use mybookmarks::models::Bookmark;
use owo_colors::OwoColorize;

pub trait Colorize {
    fn to_colored(&self) -> String;
}

pub struct ColorizeBookmark<'a>(pub &'a Bookmark);

impl<'a> Colorize for ColorizeBookmark<'a> {
    fn to_colored(&self) -> String {
        let mut s = String::new();
        let id = short_id(&self.0.id);
        s.push_str(&format!(
            "{}. {}\n",
            id.bright_blue(),
            self.0.title.bold().green(),
        ));
        let padding = id.len() + 3;
        // padding for alignment
        s.push_str(&format!(
            "{:>padding$} {}\n",
            ">".red(),
            self.0.url.yellow()
        ));

        if !self.0.description.trim().is_empty() {
            s.push_str(&format!("{:>padding$} {}\n", "+".red(), self.0.description));
        }

        if !self.0.tags.is_empty() {
            let tags_str = self.0.tags.join(", ");
            s.push_str(&format!("{:>padding$} {}\n", "#".red(), tags_str.blue()));
        }
        s
    }
}

/// Group heading such as `example.com (3)`
pub fn colored_heading(name: &str, count: usize) -> String {
    format!("{} {}", name.bold().magenta(), format!("({})", count).dimmed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn bookmark(id: &str, tags: &[&str], description: &str) -> Bookmark {
        Bookmark {
            id: id.to_string(),
            url: "https://rust-lang.org".to_string(),
            title: "Rust Programming Language".to_string(),
            description: description.to_string(),
            domain: "rust-lang.org".to_string(),
            favicon: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_colorize_bookmark_with_tags() {
        let colorized = ColorizeBookmark(&bookmark("id-1", &["rust", "testing"], "")).to_colored();
        assert!(colorized.contains("rust, testing"));
        assert!(colorized.contains("#"));
    }

    #[test]
    fn test_colorize_bookmark_without_tags() {
        let colorized = ColorizeBookmark(&bookmark("id-1", &[], "A test bookmark")).to_colored();
        let lines: Vec<&str> = colorized.lines().collect();
        let has_tag_line = lines.iter().any(|line| line.contains('#'));
        assert!(!has_tag_line, "Should not have tag line for empty tags");
    }

    #[test]
    fn test_colorize_output_structure() {
        let colorized = ColorizeBookmark(&bookmark(
            "42abcdef-0000",
            &["rust", "programming"],
            "Official Rust website",
        ))
        .to_colored();
        let lines: Vec<&str> = colorized.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("42abcdef"));
        assert!(!lines[0].contains("0000"));
        assert!(lines[0].contains("Rust Programming Language"));
        assert!(lines[1].contains("https://rust-lang.org"));
        assert!(lines[2].contains("Official Rust website"));
        assert!(lines[3].contains("programming"));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_colorize_bookmark_empty_description(#[case] description: &str) {
        let colorized = ColorizeBookmark(&bookmark("id-1", &["rust"], description)).to_colored();
        assert_eq!(colorized.lines().count(), 3);
    }

    #[test]
    fn test_colored_heading() {
        let heading = colored_heading("example.com", 3);
        assert!(heading.contains("example.com"));
        assert!(heading.contains("(3)"));
    }
}
