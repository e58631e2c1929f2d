//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-transfer`, `provider-spotify`,
//! `provider-ytmusic`). Host applications can depend on `playlist-port` and
//! enable the documented features without needing to wire each crate
//! individually.
