//! Content loading errors.

use thiserror::Error;

/// The only failure a content load can produce.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load {location}: {status}")]
    Status { location: String, status: u16 },
    #[error("Failed to parse {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Request for {location} failed: {source}")]
    Transport {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid content location {location}: {reason}")]
    InvalidLocation { location: String, reason: String },
}

impl LoadError {
    /// The location that failed to load.
    pub fn location(&self) -> &str {
        match self {
            LoadError::Status { location, .. }
            | LoadError::Parse { location, .. }
            | LoadError::Transport { location, .. }
            | LoadError::Io { location, .. }
            | LoadError::InvalidLocation { location, .. } => location,
        }
    }

    /// HTTP status for non-success responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = LoadError::Status {
            location: "/assets/data/works.json".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "Failed to load /assets/data/works.json: 500");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.location(), "/assets/data/works.json");
    }
}
