use super::criteria::{Dimension, EvaluationCriteria};
use super::transcript::Transcript;
use super::{ConversationEvaluator, DimensionScore, EvaluationError, EvaluationResult};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, warn};

const DEFAULT_JUDGE_SCORE: i64 = 5;
const MISSING_FEEDBACK: &str = "No feedback provided.";

/// Completion backend used by the judge evaluator. Calls may block; the HTTP
/// handler runs evaluations on the blocking pool.
pub trait JudgeClient: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, JudgeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("judge backend unavailable: {0}")]
    Unavailable(String),
    #[error("judge returned malformed JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Evaluator that delegates scoring to an external model and normalizes its reply.
pub struct JudgeEvaluator<C> {
    client: C,
    criteria: EvaluationCriteria,
}

impl<C: JudgeClient> JudgeEvaluator<C> {
    pub fn new(client: C, criteria: EvaluationCriteria) -> Self {
        Self { client, criteria }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn prompt(&self, transcript: &Transcript) -> String {
        let mut prompt = String::from(
            "You are an expert sales trainer evaluating a discovery conversation using the SPIN methodology.\n\
             Score the SALESPERSON (not the customer) from 1 to 10 on each dimension.\n\nDimensions:\n",
        );

        for (dimension, weight) in self.criteria.entries() {
            prompt.push_str(&format!(
                "- {} ({}%): {}\n",
                dimension.key(),
                weight,
                rubric_hint(dimension)
            ));
        }

        prompt.push_str(
            "\nRespond with JSON only:\n\
             {\"dimensions\": {\"<key>\": {\"score\": 1-10, \"feedback\": \"1-2 sentences\"}}, \
             \"summary\": \"2-3 sentence overall assessment\"}\n\nTranscript:\n",
        );
        prompt.push_str(&transcript.render());
        prompt
    }
}

impl<C: JudgeClient> ConversationEvaluator for JudgeEvaluator<C> {
    fn evaluate(&self, transcript: &Transcript) -> Result<EvaluationResult, EvaluationError> {
        info!(turns = transcript.len(), "requesting judge evaluation");

        let reply = self.client.complete(&self.prompt(transcript))?;
        let parsed = parse_judge_reply(&reply)?;

        let dimensions = Dimension::ordered()
            .into_iter()
            .map(|dimension| {
                let entry = parsed.dimensions.get(dimension.key());
                if entry.is_none() {
                    warn!(dimension = dimension.key(), "judge omitted dimension");
                }

                let score = entry
                    .and_then(|entry| entry.score)
                    .unwrap_or(DEFAULT_JUDGE_SCORE)
                    .clamp(1, 10) as u8;
                let feedback = entry
                    .and_then(|entry| entry.feedback.clone())
                    .filter(|feedback| !feedback.trim().is_empty())
                    .unwrap_or_else(|| MISSING_FEEDBACK.to_string());

                DimensionScore::new(dimension, score, feedback)
            })
            .collect();

        let summary = parsed.summary.filter(|summary| !summary.trim().is_empty());
        let result = EvaluationResult::assemble(dimensions, &self.criteria, summary);

        info!(overall_score = result.overall_score, "judge evaluation completed");
        Ok(result)
    }

    fn criteria(&self) -> &EvaluationCriteria {
        &self.criteria
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct JudgeReply {
    #[serde(default)]
    pub dimensions: HashMap<String, JudgeDimension>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct JudgeDimension {
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<i64>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Models sometimes return scores as floats or strings.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_json::Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.round() as i64)),
        serde_json::Value::String(raw) => raw.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }))
}

/// Strip an optional Markdown code fence and parse the JSON body.
pub(crate) fn parse_judge_reply(reply: &str) -> Result<JudgeReply, JudgeError> {
    let mut body = reply.trim();
    if body.starts_with("```") {
        if let Some(inner) = body.split("```").nth(1) {
            body = inner.strip_prefix("json").unwrap_or(inner);
        }
    }

    Ok(serde_json::from_str(body.trim())?)
}

fn rubric_hint(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Patience => "waited for articulated pain before mentioning solutions",
        Dimension::ImplicationDepth => "explored consequences from technical to business to personal impact",
        Dimension::ClientTalkRatio => "customer did most of the talking",
        Dimension::QuestionQuality => "mostly open questions with good follow-up",
        Dimension::SpinSequence => "situation, problem, implication, need-payoff order with few situation questions",
        Dimension::VocabularyCompliance => "tentative language, no guarantees or hype",
        Dimension::MonetizationQuality => "got the pain quantified in money, hours, or percentages",
    }
}
