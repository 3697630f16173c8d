use super::criteria::EvaluationCriteria;
use super::DimensionScore;

/// Scores at or above this count as strengths.
pub const STRENGTH_THRESHOLD: u8 = 7;

/// Weighted mean of the dimension scores, rounded to one decimal place.
///
/// The mean is computed in `f64` and rounded on its exact binary value, so
/// 3.85 (stored just above) becomes 3.9 while an exact tie like 6.25 goes to
/// the even digit.
pub fn weighted_score(dimensions: &[DimensionScore], criteria: &EvaluationCriteria) -> f64 {
    let (weighted, total_weight) =
        dimensions
            .iter()
            .fold((0u64, 0u64), |(weighted, total), dimension| {
                let weight = u64::from(criteria.weight(dimension.key));
                (
                    weighted + u64::from(dimension.score) * weight,
                    total + weight,
                )
            });

    if total_weight == 0 {
        return 0.0;
    }

    round_tenths(weighted as f64 / total_weight as f64)
}

fn round_tenths(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Qualitative label for an overall score.
pub fn performance_band(overall: f64) -> &'static str {
    if overall >= 8.0 {
        "excellent"
    } else if overall >= 6.0 {
        "good"
    } else if overall >= 4.0 {
        "developing"
    } else {
        "needs improvement"
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub summary: String,
}

/// Split feedback into strengths and improvements and write the narrative summary.
pub fn compose(overall: f64, dimensions: &[DimensionScore]) -> Composition {
    let (strong, weak): (Vec<_>, Vec<_>) = dimensions
        .iter()
        .partition(|dimension| dimension.score >= STRENGTH_THRESHOLD);

    Composition {
        strengths: strong.into_iter().map(|d| d.feedback.clone()).collect(),
        improvements: weak.into_iter().map(|d| d.feedback.clone()).collect(),
        summary: narrative(overall, dimensions),
    }
}

pub(crate) fn narrative(overall: f64, dimensions: &[DimensionScore]) -> String {
    let mut summary = format!(
        "Overall: {} ({:.1}/10).",
        performance_band(overall),
        overall
    );

    // First occurrence wins on ties, following reporting order.
    let top = dimensions.iter().reduce(|best, candidate| {
        if candidate.score > best.score {
            candidate
        } else {
            best
        }
    });
    let bottom = dimensions.iter().reduce(|worst, candidate| {
        if candidate.score < worst.score {
            candidate
        } else {
            worst
        }
    });

    if let (Some(top), Some(bottom)) = (top, bottom) {
        summary.push_str(&format!(
            " Strongest: {}. Focus on: {}.",
            top.dimension, bottom.dimension
        ));
    }

    summary
}
