//! Where a content document lives.

use std::fmt;
use std::path::PathBuf;

use url::Url;

use super::LoadError;

/// A resolved content location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Fetched over HTTP(S).
    Remote(Url),
    /// Read from disk.
    Local(PathBuf),
}

impl Location {
    /// Resolve a configured path.
    ///
    /// - `http(s)://` URLs are remote, `file://` URLs are local.
    /// - Anything else is joined onto `base` when one is given.
    /// - Without a base, plain strings are filesystem paths.
    pub fn resolve(path: &str, base: Option<&Url>) -> Result<Self, LoadError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(LoadError::InvalidLocation {
                location: path.to_string(),
                reason: "empty path".to_string(),
            });
        }

        match Url::parse(trimmed) {
            Ok(url) => Self::from_url(url, path),
            Err(url::ParseError::RelativeUrlWithoutBase) => match base {
                Some(base) => {
                    let joined = base.join(trimmed).map_err(|e| LoadError::InvalidLocation {
                        location: path.to_string(),
                        reason: e.to_string(),
                    })?;
                    Self::from_url(joined, path)
                }
                None => Ok(Location::Local(PathBuf::from(trimmed))),
            },
            Err(e) => Err(LoadError::InvalidLocation {
                location: path.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn from_url(url: Url, original: &str) -> Result<Self, LoadError> {
        match url.scheme() {
            "http" | "https" => Ok(Location::Remote(url)),
            "file" => url
                .to_file_path()
                .map(Location::Local)
                .map_err(|_| LoadError::InvalidLocation {
                    location: original.to_string(),
                    reason: "file URL has no local path".to_string(),
                }),
            other => Err(LoadError::InvalidLocation {
                location: original.to_string(),
                reason: format!("unsupported scheme {:?}", other),
            }),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Remote(url) => write!(f, "{}", url),
            Location::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
