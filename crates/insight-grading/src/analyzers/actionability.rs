//! Actionability: does the answer say what happens next and how success is judged.

use std::sync::LazyLock;

use super::BASE_SCORE;
use crate::rules::{Rule, RuleSet};

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        BASE_SCORE,
        vec![
            Rule::pattern(
                "action_verbs",
                r"\b(?:will|launch|build|implement|develop|test|validate|hire|partner|expand|create|ship|run|start)\b",
                1.5,
            ),
            Rule::pattern(
                "step_sequencing",
                r"\b(?:first(?:ly)?|second(?:ly)?|third|then|next|finally|afterwards|step \d+|phase \d+)\b",
                1.0,
            ),
            Rule::pattern(
                "next_step_priority",
                r"\b(?:next steps?|priorit\w*|immediately|this (?:week|month|quarter))\b",
                1.0,
            ),
            Rule::pattern(
                "success_criteria",
                r"\b(?:success (?:will be |is )?(?:measured|defined)|measure success|success criteria|success metrics?|milestones?|benchmarks?|definition of done)\b",
                1.5,
            ),
        ],
    )
});

pub fn rules() -> &'static RuleSet {
    &RULES
}
