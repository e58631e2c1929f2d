//! Match records and the transfer report
//!
//! One [`MatchRecord`] exists per source track; the final
//! [`TransferReport`] aggregates them. `succeeded + failed.len() == total`
//! holds at completion, and `failed` preserves source playlist order.

use catalog_traits::model::{Candidate, TrackDescriptor};
use serde::{Deserialize, Serialize};

/// The matching outcome for one source track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The source track being matched
    pub descriptor: TrackDescriptor,
    /// The best-scoring candidate, if the search returned any
    pub candidate: Option<Candidate>,
    /// Whether the candidate cleared the acceptance threshold
    pub accepted: bool,
    /// The best candidate's score (0.0 when there were no candidates)
    pub score: f64,
}

impl MatchRecord {
    /// Record a track that failed before scoring (search error, timeout)
    pub fn failed(descriptor: TrackDescriptor) -> Self {
        Self {
            descriptor,
            candidate: None,
            accepted: false,
            score: 0.0,
        }
    }
}

/// Summary of a completed transfer run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReport {
    /// Name of the source playlist (copied to the destination)
    pub playlist_name: String,
    /// Number of tracks in the source playlist
    pub total: usize,
    /// Number of tracks that were matched and written
    pub succeeded: usize,
    /// Tracks that could not be transferred, in source order
    pub failed: Vec<TrackDescriptor>,
    /// Identifier of the created destination playlist
    pub destination_playlist_id: String,
}

impl TransferReport {
    /// Check that every source track is accounted for
    pub fn is_consistent(&self) -> bool {
        self.succeeded + self.failed.len() == self.total
    }
}
