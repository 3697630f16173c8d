use super::lexicon::{
    contains_any, starts_with_any, CLOSED_STARTERS, IMPLICATION_INDICATORS,
    NEED_PAYOFF_INDICATORS, OPEN_STARTERS, PROBLEM_INDICATORS, SITUATION_INDICATORS,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Open,
    Closed,
}

/// Classify a turn as an open or closed question, or `None` when it asks nothing.
///
/// Questions that match neither starter list count as open.
pub fn classify_question(text: &str) -> Option<QuestionKind> {
    let text = text.trim().to_lowercase();
    if !text.contains('?') {
        return None;
    }

    if starts_with_any(&text, OPEN_STARTERS) {
        Some(QuestionKind::Open)
    } else if starts_with_any(&text, CLOSED_STARTERS) {
        Some(QuestionKind::Closed)
    } else {
        Some(QuestionKind::Open)
    }
}

/// Discovery phase of a trainee turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinPhase {
    Situation,
    Problem,
    Implication,
    NeedPayoff,
    Other,
}

impl SpinPhase {
    /// Position in the S-P-I-N progression; `Other` has none.
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            SpinPhase::Situation => Some(0),
            SpinPhase::Problem => Some(1),
            SpinPhase::Implication => Some(2),
            SpinPhase::NeedPayoff => Some(3),
            SpinPhase::Other => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpinPhase::Situation => "Situation",
            SpinPhase::Problem => "Problem",
            SpinPhase::Implication => "Implication",
            SpinPhase::NeedPayoff => "Need-Payoff",
            SpinPhase::Other => "Other",
        }
    }
}

/// Deepest phase wins: need-payoff, then implication, problem, situation.
pub fn classify_spin_phase(text: &str) -> SpinPhase {
    let text = text.to_lowercase();
    if contains_any(&text, NEED_PAYOFF_INDICATORS) {
        SpinPhase::NeedPayoff
    } else if contains_any(&text, IMPLICATION_INDICATORS) {
        SpinPhase::Implication
    } else if contains_any(&text, PROBLEM_INDICATORS) {
        SpinPhase::Problem
    } else if contains_any(&text, SITUATION_INDICATORS) {
        SpinPhase::Situation
    } else {
        SpinPhase::Other
    }
}
