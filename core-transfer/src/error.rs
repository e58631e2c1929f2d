//! Error types for transfer runs
//!
//! A `TransferError` means the run could not start or could not continue at
//! all. Per-track conditions (no match, a failed search, a failed chunk
//! write) are never errors here; they are folded into the report.

use catalog_traits::error::CatalogError;
use thiserror::Error;

use crate::job::TransferState;

/// Whole-run-fatal transfer errors
#[derive(Error, Debug)]
pub enum TransferError {
    /// The playlist URL could not be interpreted at all
    #[error("Invalid playlist URL: {0}")]
    InvalidPlaylistUrl(String),

    /// The source playlist does not exist or is not visible
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    /// Source or destination credentials were rejected
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Any other condition that prevents the run from proceeding
    #[error("Transfer failed: {0}")]
    Fatal(String),

    /// A job state transition that the state machine forbids
    #[error("Invalid state transition from {from:?} to {to:?}")]
    InvalidStateTransition {
        from: TransferState,
        to: TransferState,
    },
}

impl TransferError {
    /// Map a catalog error from a run-fatal call site onto the run boundary.
    pub(crate) fn fatal_from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { resource } => TransferError::PlaylistNotFound(resource),
            CatalogError::AccessDenied(msg) => TransferError::AccessDenied(msg),
            other => TransferError::Fatal(other.to_string()),
        }
    }
}

/// Result type alias for transfer operations
pub type Result<T> = std::result::Result<T, TransferError>;
