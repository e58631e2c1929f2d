//! Catalog Abstractions
//!
//! The two seams of the transfer pipeline: the playlist service tracks are
//! read from (`SourceCatalog`) and the playlist service tracks are written
//! to (`DestinationCatalog`). Providers implement these over their vendor
//! APIs; the orchestrator only ever sees these traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Candidate, SourcePlaylist, TrackDescriptor};

/// Read side: resolves a playlist URL/ID into an ordered track listing.
///
/// # Example
///
/// ```ignore
/// use catalog_traits::SourceCatalog;
///
/// async fn track_count(source: &dyn SourceCatalog, url: &str) -> catalog_traits::Result<usize> {
///     let playlist = source.read_playlist(url).await?;
///     Ok(playlist.tracks.len())
/// }
/// ```
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    /// Read a playlist and all of its tracks, resolving pagination.
    ///
    /// The returned tracks preserve source ordering.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` if the URL/ID does not resolve to a playlist
    /// - `CatalogError::AccessDenied` if the playlist is private/unauthorized
    async fn read_playlist(&self, playlist_url: &str) -> Result<SourcePlaylist>;
}

/// Write side: authenticated search, playlist creation, and batched appends.
///
/// Credentials are supplied at construction time by the caller; the core
/// never inspects or persists them.
#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    /// Check that the supplied credentials are usable.
    ///
    /// # Errors
    ///
    /// `CatalogError::AccessDenied` when credentials are missing or rejected.
    async fn verify_credentials(&self) -> Result<()>;

    /// Search the destination catalog for candidates matching a descriptor.
    ///
    /// Zero results is a normal outcome and yields an empty vector, not an
    /// error. The returned order is the service's relevance order.
    async fn search(&self, descriptor: &TrackDescriptor) -> Result<Vec<Candidate>>;

    /// Create a new (private) playlist and return its identifier.
    async fn create_playlist(&self, name: &str, description: &str) -> Result<String>;

    /// Append one batch of track IDs to a playlist.
    ///
    /// Callers are responsible for chunking to the service's per-call cap;
    /// a failed call must not be assumed to have written anything.
    async fn add_tracks(&self, playlist_id: &str, candidate_ids: &[String]) -> Result<()>;
}
