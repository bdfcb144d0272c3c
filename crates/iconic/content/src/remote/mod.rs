//! Remote dataset sources.
//!
//! A source delivers the raw payload text and sprite bytes; the caller hands
//! them to [`crate::DatasetStore::load_remote`], which decides whether the
//! build is new enough to install.

#[cfg(feature = "remote")]
mod http;

#[cfg(feature = "remote")]
pub use http::HttpDatasetSource;

use async_trait::async_trait;
use iconic_core::{DecodeError, ErrorSeverity, IconicError, SpriteSheet};

/// Raw payload fetched from a remote source.
#[derive(Clone, Debug)]
pub struct RemotePayload {
    pub text: String,
    pub sprite: Vec<u8>,
}

impl RemotePayload {
    /// Decodes the sprite bytes into a sheet.
    pub fn sprite_sheet(&self) -> Result<SpriteSheet, DecodeError> {
        SpriteSheet::from_png(self.sprite.clone())
    }
}

/// Errors from fetching a remote dataset.
#[derive(Clone, Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request for {resource} failed: {message}")]
    Transport { resource: String, message: String },

    #[error("request for {resource} returned status {status}")]
    Status { resource: String, status: u16 },

    #[error("remote payload rejected: {0}")]
    Decode(#[from] DecodeError),
}

impl IconicError for FetchError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Transport { .. } | Self::Status { .. } => ErrorSeverity::Recoverable,
            Self::Decode(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "FETCH_TRANSPORT",
            Self::Status { .. } => "FETCH_STATUS",
            Self::Decode(_) => "FETCH_DECODE",
        }
    }
}

/// Source of remote dataset overrides.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetches the payload text, then the sprite sheet.
    async fn fetch(&self) -> Result<RemotePayload, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_are_recoverable() {
        let err = FetchError::Status {
            resource: "iconic.txt".into(),
            status: 404,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "FETCH_STATUS");
        assert_eq!(err.to_string(), "request for iconic.txt returned status 404");
    }
}
