//! Chunked destination playlist writer
//!
//! Destination services cap how many items one append call may carry, so
//! accepted candidates are written in fixed-size chunks. A failed chunk
//! demotes exactly its own tracks to the failed list; earlier chunks stay
//! written and later chunks are still attempted. There is no rollback.

use std::sync::Arc;

use catalog_traits::catalog::DestinationCatalog;
use catalog_traits::model::TrackDescriptor;
use core_runtime::events::{EventBus, TransferEvent};
use tracing::{debug, instrument, warn};

/// Default number of track IDs per append call
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Outcome of writing accepted candidates to the destination playlist
#[derive(Debug, Default)]
pub struct WriteOutcome {
    /// Number of tracks successfully appended
    pub written: usize,
    /// Positions (into the accepted slice) whose chunk failed, in order
    pub failed_indices: Vec<usize>,
}

/// Appends accepted candidates to a destination playlist in chunks
pub struct PlaylistWriter {
    destination: Arc<dyn DestinationCatalog>,
    chunk_size: usize,
}

impl PlaylistWriter {
    pub fn new(destination: Arc<dyn DestinationCatalog>, chunk_size: usize) -> Self {
        Self {
            destination,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Write accepted (descriptor, candidate ID) pairs to the playlist.
    ///
    /// Emits a `ChunkWritten` event per successful chunk and a
    /// `TrackFailed` event per track in a failed chunk; emission is
    /// best-effort.
    #[instrument(skip(self, accepted, events), fields(playlist_id = %playlist_id, accepted = accepted.len()))]
    pub async fn write(
        &self,
        transfer_id: &str,
        playlist_id: &str,
        accepted: &[(TrackDescriptor, String)],
        events: &EventBus,
    ) -> WriteOutcome {
        let mut outcome = WriteOutcome::default();

        for (chunk_index, chunk) in accepted.chunks(self.chunk_size).enumerate() {
            let ids: Vec<String> = chunk.iter().map(|(_, id)| id.clone()).collect();

            match self.destination.add_tracks(playlist_id, &ids).await {
                Ok(()) => {
                    debug!(chunk_index, track_count = ids.len(), "Wrote chunk");
                    outcome.written += ids.len();
                    events
                        .emit(TransferEvent::ChunkWritten {
                            transfer_id: transfer_id.to_string(),
                            playlist_id: playlist_id.to_string(),
                            chunk_index,
                            track_count: ids.len(),
                        })
                        .ok();
                }
                Err(e) => {
                    warn!(chunk_index, error = %e, "Chunk write failed, continuing");
                    let base = chunk_index * self.chunk_size;
                    for (offset, (descriptor, _)) in chunk.iter().enumerate() {
                        events
                            .emit(TransferEvent::TrackFailed {
                                transfer_id: transfer_id.to_string(),
                                title: descriptor.title.clone(),
                                artist: descriptor.artist.clone(),
                                reason: format!("Chunk write failed: {}", e),
                            })
                            .ok();
                        outcome.failed_indices.push(base + offset);
                    }
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_traits::error::CatalogError;
    use catalog_traits::model::Candidate;
    use std::sync::Mutex;

    /// Destination stub that records append calls and can fail one of them.
    struct StubDestination {
        calls: Mutex<Vec<Vec<String>>>,
        fail_on_call: Option<usize>,
    }

    impl StubDestination {
        fn new(fail_on_call: Option<usize>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on_call,
            }
        }
    }

    #[async_trait]
    impl DestinationCatalog for StubDestination {
        async fn verify_credentials(&self) -> catalog_traits::Result<()> {
            Ok(())
        }

        async fn search(
            &self,
            _descriptor: &TrackDescriptor,
        ) -> catalog_traits::Result<Vec<Candidate>> {
            Ok(vec![])
        }

        async fn create_playlist(
            &self,
            _name: &str,
            _description: &str,
        ) -> catalog_traits::Result<String> {
            Ok("PL1".to_string())
        }

        async fn add_tracks(
            &self,
            _playlist_id: &str,
            candidate_ids: &[String],
        ) -> catalog_traits::Result<()> {
            let mut calls = self.calls.lock().unwrap();
            let call_index = calls.len();
            calls.push(candidate_ids.to_vec());

            if self.fail_on_call == Some(call_index) {
                return Err(CatalogError::Api {
                    status: 500,
                    message: "append rejected".to_string(),
                });
            }
            Ok(())
        }
    }

    fn accepted_pairs(count: usize) -> Vec<(TrackDescriptor, String)> {
        (0..count)
            .map(|i| {
                (
                    TrackDescriptor::new(format!("Track {}", i), "Artist"),
                    format!("vid{}", i),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_writes_in_chunks() {
        let destination = Arc::new(StubDestination::new(None));
        let writer = PlaylistWriter::new(destination.clone(), 50);
        let events = EventBus::new(256);

        let accepted = accepted_pairs(120);
        let outcome = writer.write("t1", "PL1", &accepted, &events).await;

        assert_eq!(outcome.written, 120);
        assert!(outcome.failed_indices.is_empty());

        let calls = destination.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].len(), 50);
        assert_eq!(calls[1].len(), 50);
        assert_eq!(calls[2].len(), 20);
        assert_eq!(calls[0][0], "vid0");
        assert_eq!(calls[2][19], "vid119");
    }

    #[tokio::test]
    async fn test_failed_chunk_demotes_only_its_tracks() {
        let destination = Arc::new(StubDestination::new(Some(1)));
        let writer = PlaylistWriter::new(destination.clone(), 50);
        let events = EventBus::new(256);

        let accepted = accepted_pairs(120);
        let outcome = writer.write("t1", "PL1", &accepted, &events).await;

        assert_eq!(outcome.written, 70);
        assert_eq!(outcome.failed_indices.len(), 50);
        assert_eq!(outcome.failed_indices[0], 50);
        assert_eq!(outcome.failed_indices[49], 99);

        // All three chunks were still attempted.
        assert_eq!(destination.calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_accepted_writes_nothing() {
        let destination = Arc::new(StubDestination::new(None));
        let writer = PlaylistWriter::new(destination.clone(), 50);
        let events = EventBus::new(8);

        let outcome = writer.write("t1", "PL1", &[], &events).await;

        assert_eq!(outcome.written, 0);
        assert!(destination.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chunk_events_are_emitted() {
        let destination = Arc::new(StubDestination::new(None));
        let writer = PlaylistWriter::new(destination, 2);
        let events = EventBus::new(16);
        let mut subscriber = events.subscribe();

        let accepted = accepted_pairs(5);
        writer.write("t1", "PL1", &accepted, &events).await;

        let mut chunk_events = 0;
        while let Ok(event) = subscriber.try_recv() {
            if matches!(event, TransferEvent::ChunkWritten { .. }) {
                chunk_events += 1;
            }
        }
        assert_eq!(chunk_events, 3);
    }
}
