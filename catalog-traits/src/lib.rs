//! # Catalog Traits
//!
//! Shared abstractions for the playlist transfer core.
//!
//! ## Overview
//!
//! This crate defines the seams between the transfer pipeline and the two
//! remote music catalogs it talks to:
//!
//! - **HTTP abstraction** (`http`): async `HttpClient` trait with request
//!   builder, retry policy, and response helpers. Concrete implementations
//!   live in `catalog-http`.
//! - **Catalog traits** (`catalog`): `SourceCatalog` (playlist read side)
//!   and `DestinationCatalog` (search + playlist write side). Concrete
//!   implementations live in the `provider-*` crates.
//! - **Domain model** (`model`): the fixed track shapes the matching logic
//!   operates on, isolated from vendor response schemas.
//! - **Errors** (`error`): the `CatalogError` taxonomy shared by all
//!   providers.

pub mod catalog;
pub mod error;
pub mod http;
pub mod model;

pub use catalog::{DestinationCatalog, SourceCatalog};
pub use error::{CatalogError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use model::{Candidate, SourcePlaylist, TrackDescriptor};
