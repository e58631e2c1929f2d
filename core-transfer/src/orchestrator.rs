//! # Transfer Orchestrator
//!
//! Drives one playlist transfer end to end against injected source and
//! destination catalogs:
//!
//! 1. Verify destination credentials (fatal on rejection)
//! 2. Read the source playlist (fatal on not-found/denied)
//! 3. Create the destination playlist
//! 4. Sequentially search and score each track; per-track failures are
//!    recorded and the run continues
//! 5. Append accepted candidates in chunks
//! 6. Produce a [`TransferReport`] accounting for every source track
//!
//! A deadline derived from `run_timeout_secs` is checked between tracks;
//! once expired, the remaining tracks are recorded as failed and the run
//! still proceeds to the write phase, so a slow destination yields a
//! partial report rather than a hang.

use std::sync::Arc;
use std::time::{Duration, Instant};

use catalog_traits::catalog::{DestinationCatalog, SourceCatalog};
use catalog_traits::model::TrackDescriptor;
use core_matching::{MatchScorer, MatcherConfig};
use core_runtime::events::{EventBus, TransferEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::{Result, TransferError};
use crate::job::{TransferJob, TransferState};
use crate::report::{MatchRecord, TransferReport};
use crate::writer::{PlaylistWriter, DEFAULT_CHUNK_SIZE};

/// Description template for created playlists
const DESCRIPTION_PREFIX: &str = "Transferred from Spotify playlist: ";

/// Tunables for a transfer run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Scoring and acceptance tunables
    pub matcher: MatcherConfig,
    /// Candidates considered per track
    pub max_search_results: usize,
    /// Track IDs per append call
    pub chunk_size: usize,
    /// Whole-run deadline in seconds
    pub run_timeout_secs: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            matcher: MatcherConfig::default(),
            max_search_results: 5,
            chunk_size: DEFAULT_CHUNK_SIZE,
            run_timeout_secs: 300,
        }
    }
}

/// Runs playlist transfers against injected catalog implementations
///
/// # Example
///
/// ```ignore
/// use core_transfer::{TransferConfig, TransferOrchestrator};
/// use core_runtime::events::EventBus;
///
/// let orchestrator = TransferOrchestrator::new(
///     source, destination, TransferConfig::default(), EventBus::new(100),
/// );
/// let report = orchestrator.run(playlist_url).await?;
/// println!("{}/{} transferred", report.succeeded, report.total);
/// ```
pub struct TransferOrchestrator {
    source: Arc<dyn SourceCatalog>,
    destination: Arc<dyn DestinationCatalog>,
    config: TransferConfig,
    events: EventBus,
}

impl TransferOrchestrator {
    pub fn new(
        source: Arc<dyn SourceCatalog>,
        destination: Arc<dyn DestinationCatalog>,
        config: TransferConfig,
        events: EventBus,
    ) -> Self {
        Self {
            source,
            destination,
            config,
            events,
        }
    }

    /// Transfer one playlist and return the report.
    ///
    /// # Errors
    ///
    /// Returns a `TransferError` only for whole-run-fatal conditions
    /// (rejected credentials, unresolvable playlist, failed playlist
    /// creation). Per-track failures are folded into the report.
    #[instrument(skip(self), fields(playlist_url = %playlist_url))]
    pub async fn run(&self, playlist_url: &str) -> Result<TransferReport> {
        let mut job = TransferJob::new();
        let transfer_id = job.id.to_string();

        match self.run_inner(&mut job, &transfer_id, playlist_url).await {
            Ok(report) => Ok(report),
            Err(e) => {
                job.fail(e.to_string()).ok();
                self.events
                    .emit(TransferEvent::Failed {
                        transfer_id,
                        message: e.to_string(),
                    })
                    .ok();
                Err(e)
            }
        }
    }

    async fn run_inner(
        &self,
        job: &mut TransferJob,
        transfer_id: &str,
        playlist_url: &str,
    ) -> Result<TransferReport> {
        if playlist_url.trim().is_empty() {
            return Err(TransferError::InvalidPlaylistUrl(playlist_url.to_string()));
        }

        let deadline = Instant::now() + Duration::from_secs(self.config.run_timeout_secs);

        // Credential failures must surface before any search call.
        self.destination
            .verify_credentials()
            .await
            .map_err(TransferError::fatal_from)?;

        job.transition(TransferState::ReadingSource)?;
        let playlist = self
            .source
            .read_playlist(playlist_url)
            .await
            .map_err(TransferError::fatal_from)?;

        let total = playlist.tracks.len();
        info!(
            playlist_name = %playlist.name,
            total_tracks = total,
            "Starting transfer"
        );
        self.events
            .emit(TransferEvent::Started {
                transfer_id: transfer_id.to_string(),
                playlist_name: playlist.name.clone(),
                total_tracks: total,
            })
            .ok();

        let description = format!("{}{}", DESCRIPTION_PREFIX, playlist.name);
        let playlist_id = self
            .destination
            .create_playlist(&playlist.name, &description)
            .await
            .map_err(TransferError::fatal_from)?;

        job.transition(TransferState::Matching)?;
        let records = self
            .match_tracks(job, transfer_id, &playlist.tracks, deadline)
            .await;

        job.transition(TransferState::Writing)?;
        let accepted: Vec<(TrackDescriptor, String)> = records
            .iter()
            .filter(|r| r.accepted)
            .filter_map(|r| {
                r.candidate
                    .as_ref()
                    .map(|c| (r.descriptor.clone(), c.id.clone()))
            })
            .collect();

        let writer = PlaylistWriter::new(self.destination.clone(), self.config.chunk_size);
        let outcome = writer
            .write(transfer_id, &playlist_id, &accepted, &self.events)
            .await;

        // Fold unmatched tracks and failed chunks back into source order.
        let mut write_failed = vec![false; accepted.len()];
        for index in &outcome.failed_indices {
            write_failed[*index] = true;
        }

        let mut failed = Vec::new();
        let mut accepted_pos = 0;
        for record in &records {
            if record.accepted {
                if write_failed.get(accepted_pos).copied().unwrap_or(false) {
                    failed.push(record.descriptor.clone());
                }
                accepted_pos += 1;
            } else {
                failed.push(record.descriptor.clone());
            }
        }

        job.transition(TransferState::Completed)?;

        let report = TransferReport {
            playlist_name: playlist.name,
            total,
            succeeded: total - failed.len(),
            failed,
            destination_playlist_id: playlist_id.clone(),
        };

        info!(
            succeeded = report.succeeded,
            failed = report.failed.len(),
            playlist_id = %playlist_id,
            "Transfer completed"
        );
        self.events
            .emit(TransferEvent::Completed {
                transfer_id: transfer_id.to_string(),
                destination_playlist_id: playlist_id,
                succeeded: report.succeeded,
                failed: report.failed.len(),
            })
            .ok();

        Ok(report)
    }

    /// Search and score every track sequentially, respecting the deadline.
    async fn match_tracks(
        &self,
        job: &mut TransferJob,
        transfer_id: &str,
        tracks: &[TrackDescriptor],
        deadline: Instant,
    ) -> Vec<MatchRecord> {
        let scorer = MatchScorer::new(self.config.matcher.clone());
        let total = tracks.len();
        let mut records = Vec::with_capacity(total);

        for (index, descriptor) in tracks.iter().enumerate() {
            if Instant::now() >= deadline {
                warn!(
                    remaining = total - index,
                    "Run deadline exceeded, failing remaining tracks"
                );
                for remaining in &tracks[index..] {
                    self.emit_track_failed(transfer_id, remaining, "Run deadline exceeded");
                    records.push(MatchRecord::failed(remaining.clone()));
                }
                break;
            }

            let record = match self.destination.search(descriptor).await {
                Ok(mut candidates) => {
                    candidates.truncate(self.config.max_search_results);
                    let decision = scorer.evaluate(descriptor, &candidates);

                    if decision.accepted {
                        if let Some(candidate) = &decision.candidate {
                            self.events
                                .emit(TransferEvent::TrackMatched {
                                    transfer_id: transfer_id.to_string(),
                                    title: descriptor.title.clone(),
                                    artist: descriptor.artist.clone(),
                                    candidate_id: candidate.id.clone(),
                                    score: decision.score,
                                })
                                .ok();
                        }
                    } else {
                        let reason = if decision.candidate.is_none() {
                            "No search results".to_string()
                        } else {
                            format!("Best candidate scored {:.2}", decision.score)
                        };
                        self.emit_track_failed(transfer_id, descriptor, &reason);
                    }

                    MatchRecord {
                        descriptor: descriptor.clone(),
                        candidate: decision.candidate,
                        accepted: decision.accepted,
                        score: decision.score,
                    }
                }
                Err(e) => {
                    warn!(
                        title = %descriptor.title,
                        error = %e,
                        "Search failed, continuing"
                    );
                    self.emit_track_failed(transfer_id, descriptor, &format!("Search failed: {}", e));
                    MatchRecord::failed(descriptor.clone())
                }
            };

            if !record.accepted {
                job.progress.increment_failed();
            }
            records.push(record);
            job.update_progress(index + 1, total, "Matching tracks");
            self.events
                .emit(TransferEvent::Progress {
                    transfer_id: transfer_id.to_string(),
                    tracks_processed: index + 1,
                    total_tracks: total,
                    percent: job.progress.percent,
                    phase: TransferState::Matching.as_str().to_string(),
                })
                .ok();
        }

        records
    }

    fn emit_track_failed(&self, transfer_id: &str, descriptor: &TrackDescriptor, reason: &str) {
        self.events
            .emit(TransferEvent::TrackFailed {
                transfer_id: transfer_id.to_string(),
                title: descriptor.title.clone(),
                artist: descriptor.artist.clone(),
                reason: reason.to_string(),
            })
            .ok();
    }
}
