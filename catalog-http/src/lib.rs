//! # Catalog HTTP
//!
//! Reqwest-backed implementation of the `catalog-traits` HTTP abstraction.
//!
//! Providers depend on `catalog-traits` only; host applications construct a
//! [`ReqwestHttpClient`] here and hand it to the provider connectors.

pub mod client;

pub use client::ReqwestHttpClient;
