//! Adaptive acceptance: keep candidates above a percentile-derived cutoff.
//!
//! The cutoff is `max(percentile(scores, p), min_acceptable)`. If fewer than
//! `min(MIN_RESULTS, n)` candidates clear it, the best `min(MIN_RESULTS, n)` are returned
//! instead so downstream consumers are never starved.

use tracing::debug;

use crate::model::Candidate;
use crate::ranker;

/// Smallest result set acceptance will return when that many candidates exist.
pub const MIN_RESULTS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Acceptance {
    pub accepted: Vec<Candidate>,
    pub cutoff: f64,
    pub fallback_applied: bool,
}

/// Nearest-rank percentile: sort ascending, index `ceil(p * n / 100) - 1` clamped to
/// `[0, n - 1]`. Returns 0.0 for an empty slice.
pub fn percentile(scores: &[f64], p: f64) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<f64> = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let rank = (p * n as f64 / 100.0).ceil();
    let index = if rank.is_finite() && rank >= 1.0 {
        (rank as usize - 1).min(n - 1)
    } else {
        0
    };
    sorted[index]
}

/// Filter normalized candidates. Accepted candidates keep their input order; the fallback
/// set is in rank order.
pub fn accept(candidates: Vec<Candidate>, p: f64, min_acceptable: f64) -> Acceptance {
    if candidates.is_empty() {
        return Acceptance {
            accepted: Vec::new(),
            cutoff: min_acceptable,
            fallback_applied: false,
        };
    }

    let scores: Vec<f64> = candidates.iter().map(|c| c.normalized_score).collect();
    let cutoff = percentile(&scores, p).max(min_acceptable);
    let required = MIN_RESULTS.min(candidates.len());

    let passing = candidates
        .iter()
        .filter(|c| c.normalized_score >= cutoff)
        .count();

    if passing >= required {
        let accepted = candidates
            .into_iter()
            .filter(|c| c.normalized_score >= cutoff)
            .collect();
        return Acceptance {
            accepted,
            cutoff,
            fallback_applied: false,
        };
    }

    debug!(passing, required, cutoff, "acceptance fell back to top candidates");
    let mut ranked = ranker::rank(candidates);
    ranked.truncate(required);
    Acceptance {
        accepted: ranked,
        cutoff,
        fallback_applied: true,
    }
}
