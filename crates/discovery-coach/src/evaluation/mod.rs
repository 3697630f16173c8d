//! Conversation evaluation for discovery role-play sessions.
//!
//! The rubric evaluator is a single deterministic pass: partition the transcript,
//! run the seven dimension scorers independently, then aggregate and compose.
//! The judge evaluator produces the same result shape from an external model.

pub mod classifier;
mod criteria;
mod judge;
pub mod lexicon;
mod router;
mod rules;
pub mod sequence;
mod summary;
mod transcript;

#[cfg(test)]
mod tests;

pub use criteria::{CriteriaError, Dimension, EvaluationCriteria, TOTAL_WEIGHT};
pub use judge::{JudgeClient, JudgeError, JudgeEvaluator};
pub use router::evaluation_router;
pub use summary::{compose, performance_band, weighted_score, Composition, STRENGTH_THRESHOLD};
pub use transcript::{PartitionedTranscript, Speaker, Transcript, Turn};

use rules::SCORERS;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const MAX_SCORE: u8 = 10;

/// Score and feedback for a single evaluation dimension.
///
/// Serialized as `{key, dimension, score, max_score, feedback}`: `key` is the
/// stable snake_case identifier used in `EVALUATION_WEIGHTS`, `dimension` the
/// display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub key: Dimension,
    pub dimension: String,
    pub score: u8,
    pub max_score: u8,
    pub feedback: String,
}

impl DimensionScore {
    /// Scores are clamped into `1..=MAX_SCORE`.
    pub fn new(dimension: Dimension, score: u8, feedback: impl Into<String>) -> Self {
        Self {
            key: dimension,
            dimension: dimension.label().to_string(),
            score: score.clamp(1, MAX_SCORE),
            max_score: MAX_SCORE,
            feedback: feedback.into(),
        }
    }
}

/// Complete assessment of one transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub overall_score: f64,
    pub dimensions: Vec<DimensionScore>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub summary: String,
}

impl EvaluationResult {
    pub(crate) fn assemble(
        dimensions: Vec<DimensionScore>,
        criteria: &EvaluationCriteria,
        summary_override: Option<String>,
    ) -> Self {
        let overall_score = weighted_score(&dimensions, criteria);
        let Composition {
            strengths,
            improvements,
            summary,
        } = compose(overall_score, &dimensions);

        Self {
            overall_score,
            dimensions,
            strengths,
            improvements,
            summary: summary_override.unwrap_or(summary),
        }
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|score| score.key == dimension)
    }
}

/// Strategy seam shared by the rubric and judge evaluators.
pub trait ConversationEvaluator: Send + Sync {
    fn evaluate(&self, transcript: &Transcript) -> Result<EvaluationResult, EvaluationError>;

    fn criteria(&self) -> &EvaluationCriteria;
}

/// Error raised while evaluating a transcript.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Judge(#[from] JudgeError),
}

/// Stateless, rule-based evaluator.
#[derive(Debug, Clone, Default)]
pub struct RubricEvaluator {
    criteria: EvaluationCriteria,
}

impl RubricEvaluator {
    pub fn new(criteria: EvaluationCriteria) -> Self {
        Self { criteria }
    }

    pub fn score(&self, transcript: &Transcript) -> EvaluationResult {
        let parts = transcript.partition();

        let dimensions: Vec<DimensionScore> = SCORERS
            .iter()
            .map(|(dimension, scorer)| {
                let score = scorer(&parts);
                debug!(dimension = dimension.key(), score = score.score, "dimension scored");
                score
            })
            .collect();

        let result = EvaluationResult::assemble(dimensions, &self.criteria, None);

        info!(
            turns = transcript.len(),
            trainee_turns = parts.trainee.len(),
            customer_turns = parts.customer.len(),
            overall_score = result.overall_score,
            "conversation evaluated"
        );

        result
    }
}

impl ConversationEvaluator for RubricEvaluator {
    fn evaluate(&self, transcript: &Transcript) -> Result<EvaluationResult, EvaluationError> {
        Ok(self.score(transcript))
    }

    fn criteria(&self) -> &EvaluationCriteria {
        &self.criteria
    }
}
