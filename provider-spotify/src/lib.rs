//! # Spotify Provider
//!
//! Implements the `SourceCatalog` trait over the Spotify Web API.
//!
//! ## Overview
//!
//! This module provides:
//! - Playlist ID extraction from `open.spotify.com` URLs
//! - Playlist metadata lookup and transparent track pagination
//! - Client-credentials token exchange for app-only access
//! - Boundary mapping of Spotify track objects into `TrackDescriptor`s

pub mod connector;
pub mod error;
pub mod types;

pub use connector::SpotifyConnector;
pub use error::{Result, SpotifyError};
