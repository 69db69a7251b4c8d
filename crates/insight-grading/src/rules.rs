//! Declarative scoring rules.
//!
//! Each analyzer is a [`RuleSet`]: a base score plus a table of rules, each with an id, a
//! matcher and a weight. Scoring is a fold over the table, so every rule can be looked up
//! by id and tested on its own.

use regex::Regex;

use crate::answer::Answer;
use crate::model::GradingContext;

/// Upper bound of every analyzer score.
pub const MAX_SCORE: f64 = 10.0;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a> {
    pub answer: &'a Answer,
    /// Fixed keyword set of the dimension being graded.
    pub keywords: &'a [&'static str],
    pub context: &'a GradingContext,
}

impl<'a> Subject<'a> {
    pub fn new(
        answer: &'a Answer,
        keywords: &'a [&'static str],
        context: &'a GradingContext,
    ) -> Self {
        Self {
            answer,
            keywords,
            context,
        }
    }
}

pub enum Matcher {
    /// Matches when the pattern occurs in the lowercased answer.
    Pattern(Regex),
    /// Matches when the predicate holds.
    Predicate(fn(&Subject<'_>) -> bool),
    /// Contributes `weight` per counted item, up to `cap`.
    Count {
        count: fn(&Subject<'_>) -> usize,
        cap: f64,
    },
}

pub struct Rule {
    pub id: &'static str,
    pub matcher: Matcher,
    pub weight: f64,
}

impl Rule {
    /// Rule matching a regex. Panics on an invalid pattern; tables are static.
    pub fn pattern(id: &'static str, pattern: &str, weight: f64) -> Self {
        Self {
            id,
            matcher: Matcher::Pattern(Regex::new(pattern).expect("valid regex")),
            weight,
        }
    }

    pub fn predicate(id: &'static str, predicate: fn(&Subject<'_>) -> bool, weight: f64) -> Self {
        Self {
            id,
            matcher: Matcher::Predicate(predicate),
            weight,
        }
    }

    pub fn per_item(
        id: &'static str,
        count: fn(&Subject<'_>) -> usize,
        weight: f64,
        cap: f64,
    ) -> Self {
        Self {
            id,
            matcher: Matcher::Count { count, cap },
            weight,
        }
    }

    /// Points this rule adds for `subject`. Zero when it does not match.
    pub fn contribution(&self, subject: &Subject<'_>) -> f64 {
        match &self.matcher {
            Matcher::Pattern(re) => {
                if re.is_match(subject.answer.lower()) {
                    self.weight
                } else {
                    0.0
                }
            }
            Matcher::Predicate(predicate) => {
                if predicate(subject) {
                    self.weight
                } else {
                    0.0
                }
            }
            Matcher::Count { count, cap } => (count(subject) as f64 * self.weight).min(*cap),
        }
    }

    pub fn matches(&self, subject: &Subject<'_>) -> bool {
        self.contribution(subject) > 0.0
    }
}

/// Result of folding a rule table over one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub score: f64,
    /// Ids of the rules that contributed, in table order.
    pub matched: Vec<&'static str>,
}

pub struct RuleSet {
    base: f64,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(base: f64, rules: Vec<Rule>) -> Self {
        Self { base, rules }
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.id)
    }

    /// Highest score the table can produce before capping.
    pub fn ceiling(&self) -> f64 {
        self.rules.iter().fold(self.base, |acc, r| {
            acc + match &r.matcher {
                Matcher::Count { cap, .. } => *cap,
                _ => r.weight,
            }
        })
    }

    pub fn evaluate(&self, subject: &Subject<'_>) -> RuleOutcome {
        let mut matched = Vec::new();
        let total = self.rules.iter().fold(self.base, |acc, rule| {
            let points = rule.contribution(subject);
            if points > 0.0 {
                matched.push(rule.id);
            }
            acc + points
        });
        RuleOutcome {
            score: total.clamp(0.0, MAX_SCORE),
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RuleSet {
        RuleSet::new(
            5.0,
            vec![
                Rule::pattern("digits", r"\d", 2.0),
                Rule::predicate("long", |s| s.answer.word_count() > 3, 1.0),
                Rule::per_item(
                    "keywords",
                    |s| s.keywords.iter().filter(|k| s.answer.mentions(k)).count(),
                    1.5,
                    4.0,
                ),
            ],
        )
    }

    #[test]
    fn folds_matching_rules_onto_base() {
        let answer = Answer::new("alpha beta 42");
        let context = GradingContext::new();
        let outcome = table().evaluate(&Subject::new(&answer, &["alpha", "beta"], &context));
        assert_eq!(outcome.score, 10.0);
        assert_eq!(outcome.matched, vec!["digits", "keywords"]);
    }

    #[test]
    fn count_rules_are_capped() {
        let answer = Answer::new("alpha beta gamma delta");
        let context = GradingContext::new();
        let subject = Subject::new(&answer, &["alpha", "beta", "gamma", "delta"], &context);
        let rules = table();
        assert_eq!(rules.rule("keywords").unwrap().contribution(&subject), 4.0);
        assert!(rules.rule("long").unwrap().matches(&subject));
        assert!(!rules.rule("digits").unwrap().matches(&subject));
    }

    #[test]
    fn no_match_keeps_base_score() {
        let answer = Answer::new("none");
        let context = GradingContext::new();
        let outcome = table().evaluate(&Subject::new(&answer, &[], &context));
        assert_eq!(outcome.score, 5.0);
        assert!(outcome.matched.is_empty());
    }

    #[test]
    fn ceiling_sums_weights_and_caps() {
        assert_eq!(table().ceiling(), 12.0);
    }
}
