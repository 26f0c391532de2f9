//! In-memory stand-ins for the remote services, used by the CLI and tests.

mod entities;
mod jobs;

pub use entities::InMemoryEntityStore;
pub use jobs::InMemoryJobService;

use thiserror::Error;

use crate::errors::Error;

/// Failures reported by the in-memory services
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid page token: {0}")]
    InvalidPageToken(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Injected failure on call {0}")]
    Injected(usize),

    #[error(transparent)]
    Client(#[from] Error),
}

const DEFAULT_PAGE_SIZE: usize = 10;

/// Page tokens of the simulators are plain offsets
fn parse_offset(page_token: Option<&str>) -> Result<usize, SimError> {
    match page_token {
        None => Ok(0),
        Some(token) => token
            .parse()
            .map_err(|_| SimError::InvalidPageToken(token.to_string())),
    }
}

/// Bounds of the page starting at `offset`, and the token of the next one
fn page_window(offset: usize, page_size: Option<u32>, total: usize) -> (usize, usize, Option<String>) {
    let size = page_size.map_or(DEFAULT_PAGE_SIZE, |size| size as usize);
    let start = offset.min(total);
    let end = start.saturating_add(size).min(total);
    let next = (end < total).then(|| end.to_string());
    (start, end, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset(None).unwrap(), 0);
        assert_eq!(parse_offset(Some("20")).unwrap(), 20);
        assert!(matches!(
            parse_offset(Some("abc")),
            Err(SimError::InvalidPageToken(_))
        ));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(0, Some(10), 25), (0, 10, Some("10".to_string())));
        assert_eq!(page_window(20, Some(10), 25), (20, 25, None));
        assert_eq!(page_window(0, None, 3), (0, 3, None));
        assert_eq!(page_window(40, Some(10), 25), (25, 25, None));
    }
}
