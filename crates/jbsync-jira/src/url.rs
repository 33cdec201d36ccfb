// Rust guideline compliant 2026-02-06

//! Issue URL handling.

use crate::{Error, Result};
use reqwest::Url;

fn looks_like_key(segment: &str) -> bool {
    match segment.split_once('-') {
        Some((project, number)) => {
            !project.is_empty()
                && project.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                && project.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && !number.is_empty()
                && number.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Returns true if `input` is a bare issue key such as `PROJ-123`.
pub fn is_issue_key(input: &str) -> bool {
    looks_like_key(input)
}

/// Extracts the issue key from an issue URL.
///
/// Understands `/browse/KEY`, `/projects/P/issues/KEY`, and otherwise takes
/// the first path segment shaped like a key.
///
/// # Errors
///
/// Returns `InvalidUrl` if the URL cannot be parsed or names no issue.
pub fn parse_issue_key_from_url(issue_url: &str) -> Result<String> {
    let url = Url::parse(issue_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", issue_url, e)))?;
    let parts: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    match parts.as_slice() {
        ["browse", key, ..] => return Ok(key.to_string()),
        ["projects", _, "issues", key, ..] => return Ok(key.to_string()),
        _ => {}
    }

    parts
        .iter()
        .find(|part| looks_like_key(part))
        .map(|part| part.to_string())
        .ok_or_else(|| Error::InvalidUrl(format!("could not extract issue key from URL: {}", issue_url)))
}

/// Returns `scheme://host[:port]` of an issue URL.
///
/// # Errors
///
/// Returns `InvalidUrl` if the URL cannot be parsed or has no host.
pub fn base_url_from_issue_url(issue_url: &str) -> Result<String> {
    let url = Url::parse(issue_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", issue_url, e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidUrl(format!("URL has no host: {}", issue_url)))?;

    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_url() {
        assert_eq!(
            parse_issue_key_from_url("https://jira.example.com/browse/PROJ-123").unwrap(),
            "PROJ-123"
        );
    }

    #[test]
    fn test_projects_url() {
        assert_eq!(
            parse_issue_key_from_url("https://jira.example.com/projects/PROJ/issues/PROJ-456").unwrap(),
            "PROJ-456"
        );
    }

    #[test]
    fn test_key_anywhere_in_path() {
        assert_eq!(
            parse_issue_key_from_url("https://example.atlassian.net/jira/software/c/projects/X/boards/1/ABC-7")
                .unwrap(),
            "ABC-7"
        );
    }

    #[test]
    fn test_no_key() {
        assert!(matches!(
            parse_issue_key_from_url("https://jira.example.com/dashboard"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(parse_issue_key_from_url("not a url").is_err());
    }

    #[test]
    fn test_base_url() {
        assert_eq!(
            base_url_from_issue_url("https://jira.example.com/browse/PROJ-1").unwrap(),
            "https://jira.example.com"
        );
        assert_eq!(
            base_url_from_issue_url("http://localhost:8080/browse/PROJ-1").unwrap(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_is_issue_key() {
        assert!(is_issue_key("PROJ-1"));
        assert!(is_issue_key("AB2-99"));
        assert!(!is_issue_key("PROJ"));
        assert!(!is_issue_key("PROJ-"));
        assert!(!is_issue_key("-1"));
        assert!(!is_issue_key("https://x/browse/PROJ-1"));
    }
}
