//! # Transfer Job State Machine
//!
//! Manages the lifecycle of a transfer run with validated state
//! transitions.
//!
//! ## State Machine
//!
//! ```text
//! Pending → ReadingSource → Matching → Writing → Completed
//!     ↓           ↓             ↓          ↓
//!     └───────────┴─────────────┴──────→ Failed
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_transfer::job::{TransferJob, TransferState};
//!
//! let mut job = TransferJob::new();
//! job.transition(TransferState::ReadingSource).unwrap();
//! job.transition(TransferState::Matching).unwrap();
//! job.update_progress(10, 40, "Matching tracks");
//! assert_eq!(job.progress.percent, 25);
//! ```

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::error::{Result, TransferError};

/// Unique identifier for a transfer run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferId(Uuid);

impl TransferId {
    /// Create a new random transfer ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the string representation of this ID
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The current phase of a transfer run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferState {
    /// Run has been created but not yet started
    Pending,
    /// Reading the source playlist (metadata and tracks)
    ReadingSource,
    /// Searching and scoring destination candidates per track
    Matching,
    /// Appending accepted candidates to the destination playlist
    Writing,
    /// Run completed with a report
    Completed,
    /// Run aborted on a whole-run-fatal condition
    Failed,
}

impl TransferState {
    /// Check if this state represents a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferState::Completed | TransferState::Failed)
    }

    /// Get the string representation of this state
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferState::Pending => "pending",
            TransferState::ReadingSource => "reading_source",
            TransferState::Matching => "matching",
            TransferState::Writing => "writing",
            TransferState::Completed => "completed",
            TransferState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TransferState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress information for a running transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferProgress {
    /// Total number of tracks discovered in the source playlist
    pub tracks_discovered: usize,
    /// Number of tracks processed so far
    pub tracks_processed: usize,
    /// Number of tracks that failed matching or writing
    pub tracks_failed: usize,
    /// Progress percentage (0-100)
    pub percent: u8,
    /// Human-readable description of the current phase
    pub phase: String,
}

impl TransferProgress {
    pub fn new() -> Self {
        Self {
            tracks_discovered: 0,
            tracks_processed: 0,
            tracks_failed: 0,
            percent: 0,
            phase: "Initializing".to_string(),
        }
    }

    /// Update progress with new values, capping percent at 100.
    pub fn update(&mut self, tracks_processed: usize, tracks_discovered: usize, phase: &str) {
        self.tracks_processed = tracks_processed;
        self.tracks_discovered = tracks_discovered;
        self.phase = phase.to_string();

        self.percent = if tracks_discovered > 0 {
            ((tracks_processed as f64 / tracks_discovered as f64) * 100.0).min(100.0) as u8
        } else {
            0
        };
    }

    pub fn increment_failed(&mut self) {
        self.tracks_failed += 1;
    }
}

impl Default for TransferProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// A transfer run with state machine semantics
///
/// Created in `Pending` state; every state change goes through
/// [`TransferJob::transition`], which rejects anything the state machine
/// forbids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferJob {
    /// Unique identifier for this run
    pub id: TransferId,
    /// Current state
    pub state: TransferState,
    /// Progress information
    pub progress: TransferProgress,
    /// Error message if failed
    pub error_message: Option<String>,
    /// When the run was created (Unix seconds)
    pub created_at: i64,
    /// When the run started reading the source
    pub started_at: Option<i64>,
    /// When the run reached a terminal state
    pub completed_at: Option<i64>,
}

impl TransferJob {
    /// Create a new transfer job in pending state
    pub fn new() -> Self {
        Self {
            id: TransferId::new(),
            state: TransferState::Pending,
            progress: TransferProgress::new(),
            error_message: None,
            created_at: current_timestamp(),
            started_at: None,
            completed_at: None,
        }
    }

    /// Move the job to a new state
    ///
    /// # Errors
    ///
    /// Returns `TransferError::InvalidStateTransition` if the state machine
    /// forbids the transition.
    pub fn transition(&mut self, to: TransferState) -> Result<()> {
        self.validate_transition(to)?;

        if self.state == TransferState::Pending {
            self.started_at = Some(current_timestamp());
        }
        if to.is_terminal() {
            self.completed_at = Some(current_timestamp());
        }

        self.state = to;
        self.progress.phase = to.as_str().to_string();
        if to == TransferState::Completed {
            self.progress.percent = 100;
        }
        Ok(())
    }

    /// Mark the job as failed with an error message
    ///
    /// # Errors
    ///
    /// Returns an error if the job is already in a terminal state.
    pub fn fail(&mut self, error_message: impl Into<String>) -> Result<()> {
        self.transition(TransferState::Failed)?;
        self.error_message = Some(error_message.into());
        Ok(())
    }

    /// Update progress information (only meaningful while non-terminal)
    pub fn update_progress(
        &mut self,
        tracks_processed: usize,
        tracks_discovered: usize,
        phase: &str,
    ) {
        self.progress
            .update(tracks_processed, tracks_discovered, phase);
    }

    /// Get the duration of the run in seconds, if it has finished
    pub fn duration_secs(&self) -> Option<u64> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start) as u64),
            _ => None,
        }
    }

    fn validate_transition(&self, to: TransferState) -> Result<()> {
        let valid = match (self.state, to) {
            (TransferState::Pending, TransferState::ReadingSource) => true,
            (TransferState::ReadingSource, TransferState::Matching) => true,
            (TransferState::Matching, TransferState::Writing) => true,
            (TransferState::Writing, TransferState::Completed) => true,

            // Any non-terminal state can fail
            (from, TransferState::Failed) => !from.is_terminal(),

            _ => false,
        };

        if !valid {
            return Err(TransferError::InvalidStateTransition {
                from: self.state,
                to,
            });
        }

        Ok(())
    }
}

impl Default for TransferJob {
    fn default() -> Self {
        Self::new()
    }
}

/// Current Unix timestamp in seconds
fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
