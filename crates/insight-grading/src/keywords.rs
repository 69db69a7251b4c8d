//! Vocabulary tables used by the alignment analyzer.
//!
//! Entries match whole words plus common inflections (see [`Answer::mentions`]).
//! Entries ending in `*` are stems and match any continuation.
//!
//! [`Answer::mentions`]: crate::answer::Answer::mentions

use crate::model::Dimension;

const MARKET_TRENDS: &[&str] = &[
    "market", "trend", "growth", "demand", "adoption", "forecast", "cagr", "emerging", "shift",
    "tam", "regulat*", "consumer behavior",
];

const COMPETITIVE_POSITIONING: &[&str] = &[
    "competitor", "competition", "differentiat*", "advantage", "moat", "alternative",
    "incumbent", "positioning", "unique", "barrier", "market share",
];

const CUSTOMER_VALIDATION: &[&str] = &[
    "customer", "interview", "survey", "pilot", "feedback", "persona", "pain point",
    "early adopter", "waitlist", "user", "validat*", "problem",
];

const BUSINESS_MODEL: &[&str] = &[
    "revenue", "pricing", "subscription", "margin", "unit economics", "ltv", "cac", "monetiz*",
    "freemium", "recurring", "cost",
];

const GO_TO_MARKET: &[&str] = &[
    "channel", "launch", "acquisition", "partner", "sales", "marketing", "distribution",
    "onboarding", "funnel", "referral", "outreach",
];

impl Dimension {
    /// Fixed keyword set for this dimension.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Dimension::MarketTrends => MARKET_TRENDS,
            Dimension::CompetitivePositioning => COMPETITIVE_POSITIONING,
            Dimension::CustomerValidation => CUSTOMER_VALIDATION,
            Dimension::BusinessModel => BUSINESS_MODEL,
            Dimension::GoToMarket => GO_TO_MARKET,
        }
    }
}

/// Industry vocabulary for fintech, healthtech, SaaS and e-commerce.
pub const VERTICAL_PATTERN: &str = r"\b(?:fintech|payments?|banking|lending|kyc|aml|fraud|healthtech|patients?|clinical|clinics?|hipaa|telehealth|ehr|saas|b2b|api|seats?|e-?commerce|marketplace|checkout|d2c|dtc|sku)\b";

/// Product and planning methodology vocabulary.
pub const METHODOLOGY_PATTERN: &str = r"\b(?:agile|lean|okrs?|scrum|kanban|design thinking|jobs[- ]to[- ]be[- ]done|jtbd|mvp|a/b test\w*|build[- ]measure[- ]learn|customer development)\b";
