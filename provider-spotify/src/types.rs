//! Spotify Web API response types
//!
//! Data structures for deserializing Spotify Web API responses.

use serde::{Deserialize, Serialize};

/// Spotify playlist resource (metadata fields only)
///
/// See: https://developer.spotify.com/documentation/web-api/reference/get-playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistObject {
    /// Playlist ID
    pub id: String,

    /// Playlist name
    pub name: String,

    /// Playlist description (may be empty or absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Paginated playlist tracks response
///
/// See: https://developer.spotify.com/documentation/web-api/reference/get-playlists-tracks
#[derive(Debug, Deserialize)]
pub struct PlaylistTracksPage {
    /// Items on this page
    pub items: Vec<PlaylistTrackItem>,

    /// URL of the next page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,

    /// Total number of items in the playlist
    #[serde(default)]
    pub total: u32,
}

/// One playlist entry
///
/// `track` is null for entries Spotify can no longer resolve (removed or
/// region-blocked content); such entries are skipped.
#[derive(Debug, Deserialize)]
pub struct PlaylistTrackItem {
    #[serde(default)]
    pub track: Option<TrackObject>,
}

/// Spotify track resource (fields the pipeline consumes)
#[derive(Debug, Deserialize)]
pub struct TrackObject {
    /// Track title
    #[serde(default)]
    pub name: String,

    /// Artists in credited order
    #[serde(default)]
    pub artists: Vec<ArtistObject>,

    /// Album reference
    #[serde(default)]
    pub album: Option<AlbumObject>,

    /// Track duration in milliseconds
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

/// Spotify artist reference
#[derive(Debug, Deserialize)]
pub struct ArtistObject {
    #[serde(default)]
    pub name: String,
}

/// Spotify album reference
#[derive(Debug, Deserialize)]
pub struct AlbumObject {
    #[serde(default)]
    pub name: String,
}

/// Token endpoint response for the client-credentials grant
///
/// See: https://developer.spotify.com/documentation/web-api/tutorials/client-credentials-flow
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,

    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}
