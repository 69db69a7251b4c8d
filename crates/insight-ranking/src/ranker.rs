//! Multi-criteria ordering.
//!
//! Keys, in priority order: normalized score (descending), content length (descending),
//! priority-field count (descending), title (ascending). The sort is stable, so inputs
//! equal on every key keep their incoming order.

use std::cmp::Ordering;

use crate::model::Candidate;

/// Total order used for the final ranking.
pub fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    b.normalized_score
        .total_cmp(&a.normalized_score)
        .then_with(|| b.content_len().cmp(&a.content_len()))
        .then_with(|| b.priority_fields().cmp(&a.priority_fields()))
        .then_with(|| a.title.cmp(&b.title))
}

/// Sort candidates into rank order.
pub fn rank(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(compare);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(title: &str, score: f64, content: &str) -> Candidate {
        let mut c = Candidate::new(title, title, content, "A");
        c.normalized_score = score;
        c
    }

    fn titles(ranked: &[Candidate]) -> Vec<&str> {
        ranked.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn higher_score_first() {
        let ranked = rank(vec![candidate("a", 10.0, ""), candidate("b", 90.0, "")]);
        assert_eq!(titles(&ranked), vec!["b", "a"]);
    }

    #[test]
    fn longer_content_breaks_score_ties() {
        let ranked = rank(vec![candidate("a", 50.0, "x"), candidate("b", 50.0, "xxxx")]);
        assert_eq!(titles(&ranked), vec!["b", "a"]);
    }

    #[test]
    fn priority_fields_break_length_ties() {
        let plain = candidate("a", 50.0, "same");
        let rich = candidate("b", 50.0, "same")
            .with_properties(json!({"market": "x"}).as_object().cloned().unwrap());
        let ranked = rank(vec![plain, rich]);
        assert_eq!(titles(&ranked), vec!["b", "a"]);
    }

    #[test]
    fn title_is_final_tie_break() {
        let ranked = rank(vec![
            candidate("Beta Corp", 70.0, "same content"),
            candidate("Alpha Inc", 70.0, "same content"),
        ]);
        assert_eq!(titles(&ranked), vec!["Alpha Inc", "Beta Corp"]);
    }

    #[test]
    fn fully_equal_candidates_keep_input_order() {
        let mut first = candidate("Same", 70.0, "c");
        first.id = "first".into();
        let mut second = candidate("Same", 70.0, "c");
        second.id = "second".into();
        let ranked = rank(vec![first, second]);
        assert_eq!(ranked[0].id, "first");
        assert_eq!(ranked[1].id, "second");
    }
}
