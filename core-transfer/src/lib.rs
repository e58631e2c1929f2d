//! # Transfer Engine
//!
//! Drives a playlist transfer end to end: read the source playlist, match
//! each track against the destination catalog, create the destination
//! playlist, and append accepted candidates in chunks.
//!
//! ## Architecture
//!
//! - [`job`] - transfer state machine with validated transitions
//! - [`report`] - per-track match records and the final transfer report
//! - [`writer`] - chunked destination playlist writer
//! - [`orchestrator`] - the end-to-end run loop
//!
//! The engine only sees the `SourceCatalog` and `DestinationCatalog` traits;
//! concrete providers are injected per invocation.

pub mod error;
pub mod job;
pub mod orchestrator;
pub mod report;
pub mod writer;

pub use error::{Result, TransferError};
pub use job::{TransferId, TransferJob, TransferProgress, TransferState};
pub use orchestrator::{TransferConfig, TransferOrchestrator};
pub use report::{MatchRecord, TransferReport};
pub use writer::{PlaylistWriter, WriteOutcome};
