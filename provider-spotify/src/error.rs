//! Error types for the Spotify provider

use catalog_traits::error::CatalogError;
use thiserror::Error;

/// Spotify provider errors
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Playlist URL did not contain a recognizable playlist ID
    #[error("Invalid Spotify playlist URL: {0}")]
    InvalidPlaylistUrl(String),

    /// Playlist does not exist or is not visible to this client
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Authentication failed or token is invalid
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Client-credentials token exchange failed
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// API request returned an error
    #[error("Spotify API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse an API response
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// Transport-level error from the HTTP layer
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type for Spotify operations
pub type Result<T> = std::result::Result<T, SpotifyError>;

impl From<SpotifyError> for CatalogError {
    fn from(error: SpotifyError) -> Self {
        match error {
            SpotifyError::InvalidPlaylistUrl(url) => CatalogError::NotFound {
                resource: format!("playlist at {}", url),
            },
            SpotifyError::PlaylistNotFound(id) => CatalogError::NotFound {
                resource: format!("playlist {}", id),
            },
            SpotifyError::AccessDenied(msg) => CatalogError::AccessDenied(msg),
            SpotifyError::TokenExchange(msg) => {
                CatalogError::AccessDenied(format!("token exchange failed: {}", msg))
            }
            SpotifyError::Api { status, message } => CatalogError::Api { status, message },
            SpotifyError::Parse(msg) => CatalogError::Parse(msg),
            SpotifyError::Catalog(e) => e,
        }
    }
}
