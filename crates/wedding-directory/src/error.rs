use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Coarse classification of a directory load failure.
pub enum DirectoryLoadErrorKind {
    Network,
    Parse,
}

#[derive(Debug, Error)]
pub enum DirectoryLoadError {
    #[error("failed to fetch user directory from {location}: {source}")]
    Network {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("user directory request to {location} returned status {status}")]
    HttpStatus { location: String, status: u16 },
    #[error("failed to read user directory file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("user directory at {location} is not a token mapping: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DirectoryLoadError {
    pub fn kind(&self) -> DirectoryLoadErrorKind {
        match self {
            Self::Network { .. } | Self::HttpStatus { .. } | Self::Io { .. } => {
                DirectoryLoadErrorKind::Network
            }
            Self::Parse { .. } => DirectoryLoadErrorKind::Parse,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryLocationError {
    #[error("cannot resolve '{resource}' against page url '{page_url}': {reason}")]
    Join {
        page_url: String,
        resource: String,
        reason: String,
    },
    #[error("page url '{page_url}' uses unsupported scheme '{scheme}'")]
    UnsupportedScheme { page_url: String, scheme: String },
    #[error("file url '{url}' does not map to a local path")]
    NotALocalPath { url: String },
}
