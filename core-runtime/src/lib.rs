//! # Core Runtime
//!
//! Ambient infrastructure shared by the transfer pipeline:
//!
//! - **Logging** (`logging`): `tracing-subscriber` initialization with
//!   env-filter support and pretty/JSON/compact output formats.
//! - **Events** (`events`): a `tokio::sync::broadcast` event bus carrying
//!   typed transfer progress events for presentation layers to render.

pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
pub use events::{EventBus, TransferEvent};
pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
