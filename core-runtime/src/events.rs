//! # Event Bus System
//!
//! Decoupled progress reporting for transfer runs using
//! `tokio::sync::broadcast`. The orchestrator emits [`TransferEvent`]s as a
//! run progresses; presentation layers subscribe and render them however
//! they like. Emission is best-effort: a run never fails because nobody is
//! listening.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, TransferEvent};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut subscriber = event_bus.subscribe();
//!
//! event_bus
//!     .emit(TransferEvent::Started {
//!         transfer_id: "run-1".to_string(),
//!         playlist_name: "Road Trip".to_string(),
//!         total_tracks: 42,
//!     })
//!     .ok();
//!
//! let event = subscriber.recv().await.unwrap();
//! assert!(matches!(event, TransferEvent::Started { .. }));
//! # }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::SendError, Receiver};

/// Default buffer size for the event channel
const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Events emitted during a transfer run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferEvent {
    /// Source playlist was read and the run began
    Started {
        transfer_id: String,
        playlist_name: String,
        total_tracks: usize,
    },
    /// Incremental progress update
    Progress {
        transfer_id: String,
        tracks_processed: usize,
        total_tracks: usize,
        percent: u8,
        phase: String,
    },
    /// A source track was matched to a destination candidate
    TrackMatched {
        transfer_id: String,
        title: String,
        artist: String,
        candidate_id: String,
        score: f64,
    },
    /// A source track could not be matched (or its write failed)
    TrackFailed {
        transfer_id: String,
        title: String,
        artist: String,
        reason: String,
    },
    /// A batch of accepted candidates was appended to the destination playlist
    ChunkWritten {
        transfer_id: String,
        playlist_id: String,
        chunk_index: usize,
        track_count: usize,
    },
    /// The run completed with a report
    Completed {
        transfer_id: String,
        destination_playlist_id: String,
        succeeded: usize,
        failed: usize,
    },
    /// The run aborted on a whole-run-fatal condition
    Failed {
        transfer_id: String,
        message: String,
    },
}

/// Central broadcast channel for transfer events.
///
/// Cloning an `EventBus` is cheap; all clones share the same channel.
/// Subscribers that fall behind by more than the buffer size receive
/// `RecvError::Lagged` instead of blocking emitters.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<TransferEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error if there are no active subscribers. Emitters treat both as
    /// non-fatal.
    pub fn emit(&self, event: TransferEvent) -> Result<usize, SendError<TransferEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive future events.
    ///
    /// Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<TransferEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_event() -> TransferEvent {
        TransferEvent::Started {
            transfer_id: "t-1".to_string(),
            playlist_name: "Mix".to_string(),
            total_tracks: 3,
        }
    }

    #[tokio::test]
    async fn test_emit_and_receive() {
        let bus = EventBus::new(10);
        let mut subscriber = bus.subscribe();

        bus.emit(started_event()).unwrap();

        let event = subscriber.recv().await.unwrap();
        assert_eq!(event, started_event());
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let delivered = bus.emit(started_event()).unwrap();
        assert_eq!(delivered, 2);

        assert_eq!(sub1.recv().await.unwrap(), started_event());
        assert_eq!(sub2.recv().await.unwrap(), started_event());
    }

    #[test]
    fn test_emit_without_subscribers_is_error() {
        let bus = EventBus::new(10);
        assert!(bus.emit(started_event()).is_err());
    }

    #[test]
    fn test_event_serialization_tags_variant() {
        let event = TransferEvent::Failed {
            transfer_id: "t-1".to_string(),
            message: "source unreadable".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "failed");
        assert_eq!(json["message"], "source unreadable");
    }
}
