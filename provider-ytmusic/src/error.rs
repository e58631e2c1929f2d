//! Error types for the YouTube Music provider

use catalog_traits::error::CatalogError;
use thiserror::Error;

/// YouTube Music API errors
#[derive(Error, Debug)]
pub enum YtMusicError {
    /// Auth headers are missing or incomplete
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Access denied by the API (401/403)
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// API returned a non-success response
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response structure could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Playlist edit was accepted but not applied
    #[error("Playlist write failed: {0}")]
    WriteFailed(String),

    /// Underlying catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl From<YtMusicError> for CatalogError {
    fn from(err: YtMusicError) -> Self {
        match err {
            YtMusicError::MissingCredentials(msg) | YtMusicError::AccessDenied(msg) => {
                CatalogError::AccessDenied(msg)
            }
            YtMusicError::Api { status, message } => CatalogError::Api { status, message },
            YtMusicError::Parse(msg) => CatalogError::Parse(msg),
            YtMusicError::WriteFailed(msg) => CatalogError::Api {
                status: 200,
                message: msg,
            },
            YtMusicError::Catalog(inner) => inner,
        }
    }
}

/// Result type alias for YouTube Music operations
pub type Result<T> = std::result::Result<T, YtMusicError>;
