//! # YouTube Music Provider
//!
//! Implements the `DestinationCatalog` trait over the YouTube Music
//! internal (innertube) API.
//!
//! ## Overview
//!
//! This module provides:
//! - Credential validation for browser-derived auth headers
//! - Song search with the WEB_REMIX client context
//! - Playlist creation with private visibility
//! - Batched track insertion via playlist edit actions

pub mod connector;
pub mod error;
pub mod parser;
pub mod types;

pub use connector::YtMusicConnector;
pub use error::{Result, YtMusicError};
