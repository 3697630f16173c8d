use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Required sum of all dimension weights.
pub const TOTAL_WEIGHT: u32 = 100;

/// Scored axis of a discovery conversation, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Patience,
    ImplicationDepth,
    ClientTalkRatio,
    QuestionQuality,
    SpinSequence,
    VocabularyCompliance,
    MonetizationQuality,
}

impl Dimension {
    pub const COUNT: usize = 7;

    pub fn ordered() -> [Dimension; Self::COUNT] {
        [
            Dimension::Patience,
            Dimension::ImplicationDepth,
            Dimension::ClientTalkRatio,
            Dimension::QuestionQuality,
            Dimension::SpinSequence,
            Dimension::VocabularyCompliance,
            Dimension::MonetizationQuality,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Patience => "Patience",
            Dimension::ImplicationDepth => "Implication Depth",
            Dimension::ClientTalkRatio => "Client Talk Ratio",
            Dimension::QuestionQuality => "Question Quality",
            Dimension::SpinSequence => "SPIN Sequence",
            Dimension::VocabularyCompliance => "Vocabulary Compliance",
            Dimension::MonetizationQuality => "Monetization Quality",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Dimension::Patience => "patience",
            Dimension::ImplicationDepth => "implication_depth",
            Dimension::ClientTalkRatio => "client_talk_ratio",
            Dimension::QuestionQuality => "question_quality",
            Dimension::SpinSequence => "spin_sequence",
            Dimension::VocabularyCompliance => "vocabulary_compliance",
            Dimension::MonetizationQuality => "monetization_quality",
        }
    }

    pub fn default_weight(&self) -> u32 {
        match self {
            Dimension::Patience => 25,
            Dimension::ImplicationDepth => 30,
            Dimension::ClientTalkRatio => 15,
            Dimension::QuestionQuality => 10,
            Dimension::SpinSequence => 10,
            Dimension::VocabularyCompliance => 5,
            Dimension::MonetizationQuality => 5,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Dimension {
    type Err = CriteriaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_lowercase();
        Dimension::ordered()
            .into_iter()
            .find(|dimension| dimension.key() == key)
            .ok_or(CriteriaError::UnknownDimension(value.trim().to_string()))
    }
}

/// Validated weight per dimension. Weights always sum to [`TOTAL_WEIGHT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Dimension, u32>",
    into = "BTreeMap<Dimension, u32>"
)]
pub struct EvaluationCriteria {
    weights: [u32; Dimension::COUNT],
}

impl EvaluationCriteria {
    /// Build criteria from explicit weights; dimensions left out weigh zero.
    pub fn new<I>(weights: I) -> Result<Self, CriteriaError>
    where
        I: IntoIterator<Item = (Dimension, u32)>,
    {
        let mut table = [None; Dimension::COUNT];
        for (dimension, weight) in weights {
            let slot = &mut table[dimension.index()];
            if slot.is_some() {
                return Err(CriteriaError::DuplicateDimension(dimension));
            }
            *slot = Some(weight);
        }

        let weights = table.map(|weight| weight.unwrap_or(0));
        let total = weights
            .iter()
            .fold(0u32, |total, weight| total.saturating_add(*weight));
        if total != TOTAL_WEIGHT {
            return Err(CriteriaError::InvalidTotal(total));
        }

        Ok(Self { weights })
    }

    /// Parse the `key=weight,key=weight` form used in configuration.
    pub fn from_spec(spec: &str) -> Result<Self, CriteriaError> {
        let mut weights = Vec::new();
        for entry in spec.split(',').filter(|entry| !entry.trim().is_empty()) {
            let (key, raw) = entry
                .split_once('=')
                .ok_or_else(|| CriteriaError::InvalidWeight(entry.trim().to_string()))?;
            let dimension = key.parse::<Dimension>()?;
            let weight = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| CriteriaError::InvalidWeight(entry.trim().to_string()))?;
            weights.push((dimension, weight));
        }
        Self::new(weights)
    }

    pub fn weight(&self, dimension: Dimension) -> u32 {
        self.weights[dimension.index()]
    }

    pub fn total_weight(&self) -> u32 {
        self.weights.iter().sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Dimension, u32)> + '_ {
        Dimension::ordered()
            .into_iter()
            .map(|dimension| (dimension, self.weight(dimension)))
    }
}

impl Default for EvaluationCriteria {
    fn default() -> Self {
        Self {
            weights: Dimension::ordered().map(|dimension| dimension.default_weight()),
        }
    }
}

impl TryFrom<BTreeMap<Dimension, u32>> for EvaluationCriteria {
    type Error = CriteriaError;

    fn try_from(value: BTreeMap<Dimension, u32>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EvaluationCriteria> for BTreeMap<Dimension, u32> {
    fn from(value: EvaluationCriteria) -> Self {
        value.entries().collect()
    }
}

/// Rejected weight configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("dimension weights must sum to 100, got {0}")]
    InvalidTotal(u32),
    #[error("dimension '{0}' is weighted more than once")]
    DuplicateDimension(Dimension),
    #[error("unknown evaluation dimension '{0}'")]
    UnknownDimension(String),
    #[error("invalid weight entry '{0}', expected key=integer")]
    InvalidWeight(String),
}
