use mybookmarks::error::{MyBookmarksError, Result};
use mybookmarks::models::extract_domain;
use mybookmarks::UpdateOutcome;
use std::io::{self, Write};

/// Ask a yes/no question on stderr; only `y`/`yes` counts as consent
pub fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{}", prompt);
    io::stderr().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(is_yes(&response))
}

fn is_yes(response: &str) -> bool {
    let response = response.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Turn an id-addressed outcome into the error the user should see
pub fn check_outcome(outcome: UpdateOutcome, id: &str) -> Result<()> {
    match outcome {
        UpdateOutcome::Updated => Ok(()),
        UpdateOutcome::NotFound => Err(MyBookmarksError::NotFound(id.to_string())),
        UpdateOutcome::UrlTaken => Err(MyBookmarksError::InvalidInput(
            "another bookmark already uses that URL".to_string(),
        )),
        UpdateOutcome::Invalid => Err(MyBookmarksError::InvalidInput(
            "URL and title cannot be empty".to_string(),
        )),
    }
}

/// Tags are single words; reject anything with whitespace up front
pub fn validate_tags(tags: &[String]) -> Result<()> {
    match tags.iter().find(|t| t.chars().any(char::is_whitespace)) {
        Some(t) => Err(MyBookmarksError::InvalidInput(format!(
            "Invalid tag name: '{}' (tags cannot contain spaces)",
            t
        ))),
        None => Ok(()),
    }
}

/// Typed URLs need a host. Blank input is left to the store, which rejects it itself
pub fn validate_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() || extract_domain(url).is_some() {
        return Ok(());
    }
    Err(MyBookmarksError::InvalidInput(format!(
        "'{}' is not a URL with a host (try https://{})",
        url, url
    )))
}
