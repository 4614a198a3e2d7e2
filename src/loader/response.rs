//! Fetched document wrapper.

use reqwest::StatusCode;

/// Raw result of fetching a content location.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Response for a file read from disk.
    pub fn from_file(body: Vec<u8>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Check if the response is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
