//! Specificity: concrete numbers, money, percentages, KPIs, dates and targets.

use std::sync::LazyLock;

use super::BASE_SCORE;
use crate::rules::{Rule, RuleSet};

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        BASE_SCORE,
        vec![
            Rule::pattern("numeric_value", r"\d", 1.0),
            Rule::pattern(
                "currency",
                r"[$€£¥]|\b(?:usd|eur|gbp|dollars?|euros?)\b|\b\d+(?:\.\d+)?\s?(?:k|m|bn|million|billion)\b",
                1.0,
            ),
            Rule::pattern("percentage", r"\d\s?%|\bpercent\b", 1.0),
            Rule::pattern(
                "kpi_vocabulary",
                r"\b(?:kpis?|cac|ltv|arr|mrr|churn|retention|conversion rate|nps|roi|gross margin|burn rate|payback)\b",
                1.0,
            ),
            Rule::pattern(
                "timeline",
                r"\b(?:q[1-4]|20\d{2}|\d+\s+(?:days?|weeks?|months?|quarters?|years?)|monthly|quarterly|annually)\b",
                0.5,
            ),
            Rule::pattern(
                "deadline",
                r"\b(?:by (?:the )?end of|by (?:q[1-4]|20\d{2}|january|february|march|april|may|june|july|august|september|october|november|december)|within \d+|deadline|no later than)\b",
                0.5,
            ),
            Rule::pattern(
                "quantified_target",
                r"\b(?:target|goal|aim|reach|achieve|grow)\w*\b[^.\n]{0,40}?\d",
                1.0,
            ),
        ],
    )
});

pub fn rules() -> &'static RuleSet {
    &RULES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Answer;
    use crate::model::GradingContext;
    use crate::rules::Subject;

    fn matches(id: &str, text: &str) -> bool {
        let answer = Answer::new(text);
        let context = GradingContext::new();
        rules()
            .rule(id)
            .unwrap_or_else(|| panic!("missing rule {id}"))
            .matches(&Subject::new(&answer, &[], &context))
    }

    #[test]
    fn currency_rule() {
        assert!(matches("currency", "We charge $49 per seat"));
        assert!(matches("currency", "a 2.5M seed round"));
        assert!(matches("currency", "priced in EUR"));
        assert!(!matches("currency", "we charge per seat"));
    }

    #[test]
    fn percentage_rule() {
        assert!(matches("percentage", "churn under 5%"));
        assert!(matches("percentage", "ten percent of the market"));
        assert!(!matches("percentage", "a large share"));
    }

    #[test]
    fn kpi_rule() {
        assert!(matches("kpi_vocabulary", "our CAC payback is short"));
        assert!(matches("kpi_vocabulary", "tracking MRR weekly"));
        assert!(!matches("kpi_vocabulary", "customers like it"));
    }

    #[test]
    fn timeline_and_deadline_rules() {
        assert!(matches("timeline", "launch in Q3"));
        assert!(matches("timeline", "over the next 18 months"));
        assert!(matches("deadline", "live by the end of the year"));
        assert!(matches("deadline", "signed within 30 days"));
        assert!(!matches("deadline", "eventually"));
    }

    #[test]
    fn quantified_target_rule() {
        assert!(matches("quantified_target", "Our goal is to reach 1000 paying users"));
        assert!(!matches("quantified_target", "Our goal is growth. We have 3 pilots"));
    }

    #[test]
    fn rich_answer_hits_the_cap() {
        let answer = Answer::new(
            "Target: 500 customers by Q4 2025, $20k MRR, churn below 3% within 6 months.",
        );
        let context = GradingContext::new();
        let outcome = rules().evaluate(&Subject::new(&answer, &[], &context));
        assert_eq!(outcome.score, 10.0);
    }
}
