//! Weighted fuzzy scorer for destination search candidates
//!
//! Computes a similarity score in `[0, 1]` between a source descriptor and
//! each candidate, then selects the best candidate subject to a configurable
//! acceptance threshold. Ties are broken in favor of the earlier candidate,
//! preserving the search engine's relevance order.

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use tracing::debug;

use catalog_traits::model::{Candidate, TrackDescriptor};

use crate::normalize::normalize;

/// Scorer configuration
///
/// The threshold and duration tolerance were chosen empirically; both are
/// tunable so callers can trade match quality against transfer throughput.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum score for a candidate to be accepted
    pub accept_threshold: f64,
    /// Maximum duration difference (seconds) before the penalty applies
    pub duration_tolerance_secs: u32,
    /// Score penalty for candidates outside the duration tolerance
    pub duration_penalty: f64,
    /// Weight of title similarity in the combined score
    pub title_weight: f64,
    /// Weight of artist similarity in the combined score
    pub artist_weight: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 0.75,
            duration_tolerance_secs: 5,
            duration_penalty: 0.2,
            title_weight: 0.6,
            artist_weight: 0.4,
        }
    }
}

/// Outcome of scoring one descriptor against a candidate list
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDecision {
    /// Best-scoring candidate, if the search returned any
    pub candidate: Option<Candidate>,
    /// Score of the best candidate (0.0 when no candidates)
    pub score: f64,
    /// Whether the best candidate met the acceptance threshold
    pub accepted: bool,
}

impl MatchDecision {
    fn rejected() -> Self {
        Self {
            candidate: None,
            score: 0.0,
            accepted: false,
        }
    }
}

/// Match scorer
///
/// # Example
///
/// ```
/// use catalog_traits::model::{Candidate, TrackDescriptor};
/// use core_matching::{MatcherConfig, MatchScorer};
///
/// let scorer = MatchScorer::new(MatcherConfig::default());
/// let descriptor = TrackDescriptor::new("Karma Police", "Radiohead");
/// let candidate = Candidate {
///     id: "vid1".to_string(),
///     title: "Karma Police".to_string(),
///     artist: "Radiohead".to_string(),
///     duration_secs: None,
/// };
///
/// let decision = scorer.evaluate(&descriptor, &[candidate]);
/// assert!(decision.accepted);
/// ```
#[derive(Debug, Clone)]
pub struct MatchScorer {
    config: MatcherConfig,
}

impl MatchScorer {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Score a single candidate against a descriptor.
    ///
    /// Weighted Jaro-Winkler over normalized title and artist. When both
    /// durations are known and differ by more than the tolerance, the
    /// duration penalty is subtracted: a large duration gap strongly
    /// signals a wrong version or remix.
    pub fn score(&self, descriptor: &TrackDescriptor, candidate: &Candidate) -> f64 {
        let title_sim = jaro_winkler(&normalize(&descriptor.title), &normalize(&candidate.title));
        let artist_sim =
            jaro_winkler(&normalize(&descriptor.artist), &normalize(&candidate.artist));

        let weight_sum = self.config.title_weight + self.config.artist_weight;
        let mut score = if weight_sum > 0.0 {
            (self.config.title_weight * title_sim + self.config.artist_weight * artist_sim)
                / weight_sum
        } else {
            0.0
        };

        if let (Some(expected), Some(actual)) = (descriptor.duration_secs, candidate.duration_secs)
        {
            let diff = expected.abs_diff(actual);
            if diff > self.config.duration_tolerance_secs {
                score -= self.config.duration_penalty;
            }
        }

        score.clamp(0.0, 1.0)
    }

    /// Select the best candidate and decide acceptance.
    ///
    /// The highest-scoring candidate wins; ties go to the first-returned
    /// candidate (strict `>` comparison). An empty candidate list yields a
    /// rejected decision with score 0.0.
    pub fn evaluate(&self, descriptor: &TrackDescriptor, candidates: &[Candidate]) -> MatchDecision {
        let mut best: Option<(usize, f64)> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            let score = self.score(descriptor, candidate);
            debug!(
                candidate_id = %candidate.id,
                score = score,
                "Scored candidate"
            );
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((index, score)),
            }
        }

        match best {
            Some((index, score)) => MatchDecision {
                candidate: Some(candidates[index].clone()),
                score,
                accepted: score >= self.config.accept_threshold,
            },
            None => MatchDecision::rejected(),
        }
    }
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}
