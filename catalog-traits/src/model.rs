//! Domain model for the transfer pipeline
//!
//! Vendor API responses are mapped into these fixed shapes at the provider
//! boundary, isolating the matching logic from vendor schema drift.

use serde::{Deserialize, Serialize};

/// A track as read from the source catalog.
///
/// Immutable once produced. Missing title/artist fields on the source side
/// are represented as empty strings rather than errors, so partial metadata
/// never aborts a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// Track title
    pub title: String,
    /// Primary artist name
    pub artist: String,
    /// Album name, when the source exposes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Track duration in seconds, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
}

impl TrackDescriptor {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: None,
            duration_secs: None,
        }
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_duration_secs(mut self, duration_secs: u32) -> Self {
        self.duration_secs = Some(duration_secs);
        self
    }

    /// Search query string for the destination catalog: "{title} {artist}".
    pub fn search_query(&self) -> String {
        let query = format!("{} {}", self.title, self.artist);
        query.trim().to_string()
    }
}

/// A destination-catalog search result considered as a possible match.
///
/// Ephemeral: candidates live only for the duration of one track's
/// search-and-score step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Destination-service track identifier (e.g. a video ID)
    pub id: String,
    /// Candidate title
    pub title: String,
    /// Candidate primary artist
    pub artist: String,
    /// Candidate duration in seconds, when the search result exposes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
}

/// A playlist read from the source catalog, pagination already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePlaylist {
    /// Source-service playlist identifier
    pub id: String,
    /// Playlist name
    pub name: String,
    /// Playlist description, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tracks in source order
    pub tracks: Vec<TrackDescriptor>,
}
