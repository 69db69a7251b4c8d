//! Per-source score normalization.
//!
//! Raw scores from different sources are not comparable: a source of long, property-rich
//! documents scores higher across the board. Each candidate's raw score is divided by its
//! source's maximum, then small richness terms for content length and property count are
//! added, giving a common 0..=100 band.
//!
//! The divisor is floored at [`NORMALIZATION_FLOOR`]. Without the floor a source whose
//! candidates all score near the base value would divide by a tiny maximum and every one of
//! them would come out near 100.

use std::collections::BTreeMap;

use crate::model::Candidate;

/// Lowest per-source maximum used as a divisor.
pub const NORMALIZATION_FLOOR: f64 = 50.0;

const RATIO_WEIGHT: f64 = 80.0;
const LENGTH_WEIGHT: f64 = 10.0;
const PROPERTY_WEIGHT: f64 = 10.0;
/// Content length (chars) at which the length term saturates.
const LENGTH_SATURATION: f64 = 200.0;
/// Property count at which the property term saturates.
const PROPERTY_SATURATION: f64 = 5.0;

/// Raw-score statistics for one source within one ranking run.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceStats {
    pub source_id: String,
    pub max_raw_score: f64,
    pub count: usize,
}

impl SourceStats {
    /// Group candidates by source and record each source's maximum raw score.
    pub fn collect(candidates: &[Candidate]) -> BTreeMap<String, SourceStats> {
        let mut stats: BTreeMap<String, SourceStats> = BTreeMap::new();
        for c in candidates {
            let raw = sanitize(c.raw_score);
            let entry = stats
                .entry(c.source_id.clone())
                .or_insert_with(|| SourceStats {
                    source_id: c.source_id.clone(),
                    max_raw_score: 0.0,
                    count: 0,
                });
            entry.max_raw_score = entry.max_raw_score.max(raw);
            entry.count += 1;
        }
        stats
    }

    /// Divisor used for this source's candidates.
    pub fn denominator(&self, floor: f64) -> f64 {
        self.max_raw_score.max(floor)
    }
}

/// Normalized score for a single candidate given its source's maximum.
pub fn normalized_score(
    raw_score: f64,
    max_raw_score: f64,
    content_len: usize,
    property_count: usize,
    floor: f64,
) -> f64 {
    let denominator = sanitize(max_raw_score).max(floor);
    if denominator <= 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let ratio = sanitize(raw_score) / denominator;
    let length = (content_len as f64 / LENGTH_SATURATION).min(1.0);
    let properties = (property_count as f64 / PROPERTY_SATURATION).min(1.0);
    let score = RATIO_WEIGHT * ratio + LENGTH_WEIGHT * length + PROPERTY_WEIGHT * properties;
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Set `normalized_score` on every candidate in place.
pub fn normalize(candidates: &mut [Candidate], floor: f64) -> BTreeMap<String, SourceStats> {
    let stats = SourceStats::collect(candidates);
    for c in candidates.iter_mut() {
        let max = stats
            .get(&c.source_id)
            .map(|s| s.max_raw_score)
            .unwrap_or(0.0);
        c.normalized_score =
            normalized_score(c.raw_score, max, c.content_len(), c.properties.len(), floor);
    }
    stats
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
