//! # Match Scoring
//!
//! Fuzzy matching between source track descriptors and destination search
//! candidates.
//!
//! ## Overview
//!
//! - **Normalization** (`normalize`): case folding, punctuation stripping,
//!   and removal of featuring-artist annotations so cosmetic differences
//!   between catalogs do not depress similarity scores.
//! - **Scoring** (`scorer`): weighted Jaro-Winkler similarity over
//!   normalized title and artist, with an optional duration penalty that
//!   flags wrong versions and remixes.
//!
//! All tunables (acceptance threshold, duration tolerance, field weights)
//! live in [`MatcherConfig`] rather than being hard-wired.

pub mod normalize;
pub mod scorer;

pub use normalize::normalize;
pub use scorer::{MatchDecision, MatchScorer, MatcherConfig};
