use insight_ranking::acceptance::{self, MIN_RESULTS};
use insight_ranking::diversity::cap_per_source;
use insight_ranking::normalize::{normalize, NORMALIZATION_FLOOR};
use insight_ranking::pipeline::score_candidates;
use insight_ranking::tokens::extract_tokens;
use insight_ranking::{
    Candidate, CandidateInput, LexicalScorer, RankingConfig, RankingPipeline, RankingRequest,
    RelevanceScorer, SaturatingScorer,
};
use proptest::prelude::*;
use serde_json::json;

const VOCAB: &[&str] = &[
    "payment", "fraud", "detection", "market", "growth", "saas", "churn", "30%", "revenue",
    "b2b", "platform", "health", "clinic", "retail", "logistics", "the", "and", "ai",
];

const SOURCES: &[&str] = &["A", "B", "C"];

fn words() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 0..12)
}

fn candidate_input() -> impl Strategy<Value = CandidateInput> {
    (
        "[a-z]{1,8}",
        words(),
        prop::sample::select(SOURCES.to_vec()),
        prop::bool::ANY,
    )
        .prop_map(|(title, content, source, rich)| CandidateInput {
            id: title.clone(),
            title,
            content: content.join(" "),
            properties: rich.then(|| json!({"business_model": "b2b", "market": "smb"})),
            source_id: source.to_string(),
        })
}

fn inputs() -> impl Strategy<Value = Vec<CandidateInput>> {
    prop::collection::vec(candidate_input(), 0..25)
}

fn input(id: &str, title: &str, content: &str, source: &str) -> CandidateInput {
    CandidateInput {
        id: id.into(),
        title: title.into(),
        content: content.into(),
        properties: None,
        source_id: source.into(),
    }
}

proptest! {
    #[test]
    fn ranking_is_deterministic(query in words(), batch in inputs()) {
        let pipeline = RankingPipeline::default();
        let query = query.join(" ");
        let first = pipeline.rank(&query, batch.clone());
        let second = pipeline.rank(&query, batch);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn normalized_scores_stay_in_band(query in words(), batch in inputs()) {
        let result = RankingPipeline::default().rank(&query.join(" "), batch);
        for c in &result.candidates {
            prop_assert!((0.0..=100.0).contains(&c.normalized_score), "{}", c.normalized_score);
            prop_assert!(c.raw_score >= 0.0);
        }
    }

    #[test]
    fn never_returns_fewer_than_three_when_available(batch in inputs()) {
        let total = batch.len();
        let config = RankingConfig { max_per_source: 100, ..RankingConfig::default() };
        let result = RankingPipeline::new(config).unwrap().rank("market growth", batch);
        prop_assert!(result.len() >= MIN_RESULTS.min(total));
    }

    #[test]
    fn acceptance_never_starves(
        scores in prop::collection::vec(0.0f64..=100.0, 3..40),
        p in 1.0f64..=100.0,
        min_acceptable in 0.0f64..=100.0,
    ) {
        let candidates: Vec<Candidate> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mut c = Candidate::new(i.to_string(), i.to_string(), "", "A");
                c.normalized_score = *s;
                c
            })
            .collect();
        let outcome = acceptance::accept(candidates, p, min_acceptable);
        prop_assert!(outcome.accepted.len() >= MIN_RESULTS);
    }

    #[test]
    fn extra_matching_token_never_lowers_scores(
        query in prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 1..5),
        target in words(),
        others in prop::collection::vec(words(), 0..5),
    ) {
        let tokens = extract_tokens(&query.join(" "));
        prop_assume!(!tokens.is_empty());
        let extra = tokens[0].clone();

        let scorers: [&dyn RelevanceScorer; 2] = [&LexicalScorer, &SaturatingScorer];
        for scorer in scorers {
            let build = |content: String| {
                let mut batch = vec![Candidate::new("target", "target", content, "A")];
                batch.extend(
                    others
                        .iter()
                        .enumerate()
                        .map(|(i, w)| Candidate::new(i.to_string(), "other", w.join(" "), "A")),
                );
                score_candidates(scorer, &tokens, &mut batch);
                normalize(&mut batch, NORMALIZATION_FLOOR);
                batch.swap_remove(0)
            };

            let before = build(target.join(" "));
            let after = build(format!("{} {}", target.join(" "), extra));
            prop_assert!(after.raw_score >= before.raw_score);
            prop_assert!(after.normalized_score >= before.normalized_score);
        }
    }

    #[test]
    fn diversity_cap_holds_per_source(batch in inputs(), cap in 1usize..4) {
        let config = RankingConfig { max_per_source: cap, ..RankingConfig::default() };
        let result = RankingPipeline::new(config).unwrap().rank("payment fraud", batch);
        for source in SOURCES {
            let count = result.candidates.iter().filter(|c| c.source_id == *source).count();
            prop_assert!(count <= cap);
        }
    }
}

#[test]
fn zeta_outranks_acme_for_fraud_query() {
    let result = RankingPipeline::default().rank(
        "fraud detection payment",
        vec![
            input("1", "Zeta", "payment fraud detection AI KPI 30% reduction", "A"),
            input("2", "Acme", "short", "A"),
        ],
    );
    assert_eq!(result.ids(), vec!["1", "2"]);
    assert!(result.candidates[0].normalized_score > result.candidates[1].normalized_score);
}

#[test]
fn identical_candidates_order_by_title() {
    let content = "identical content for both companies";
    let result = RankingPipeline::default().rank(
        "content companies",
        vec![
            input("b", "Beta Corp", content, "A"),
            input("a", "Alpha Inc", content, "B"),
        ],
    );
    assert_eq!(result.ids(), vec!["a", "b"]);
}

#[test]
fn single_slot_per_source_keeps_top_candidate() {
    let request = RankingRequest {
        query: "growth market".into(),
        candidates: vec![
            input("1", "Top", "market growth forecast with 40% CAGR", "A"),
            input("2", "Mid", "market notes", "A"),
            input("3", "Low", "unrelated", "A"),
        ],
        max_per_source: Some(1),
        ..RankingRequest::default()
    };
    let result = RankingPipeline::default().rank_request(request).unwrap();
    assert_eq!(result.ids(), vec!["1"]);
}

#[test]
fn diversity_after_ranking_drops_excess_only() {
    let ranked: Vec<Candidate> = ["A", "A", "B", "A"]
        .iter()
        .enumerate()
        .map(|(i, s)| Candidate::new(i.to_string(), "t", "", *s))
        .collect();
    let capped = cap_per_source(ranked, 2);
    let ids: Vec<&str> = capped.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["0", "1", "2"]);
}

#[test]
fn malformed_properties_do_not_fail_ranking() {
    let mut bad = input("1", "Bad", "payment data", "A");
    bad.properties = Some(json!(["not", "a", "map"]));
    let result = RankingPipeline::default().rank("payment", vec![bad]);
    assert_eq!(result.len(), 1);
    assert!(result.candidates[0].properties.is_empty());
}
