//! Per-source cap on the ranked list.

use std::collections::HashMap;

use crate::model::Candidate;

/// Keep at most `max_per_source` candidates from each source, preserving rank order.
/// Candidates beyond a source's cap are dropped.
pub fn cap_per_source(ranked: Vec<Candidate>, max_per_source: usize) -> Vec<Candidate> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    ranked
        .into_iter()
        .filter(|c| {
            let count = seen.entry(c.source_id.clone()).or_insert(0);
            *count += 1;
            *count <= max_per_source
        })
        .collect()
}
