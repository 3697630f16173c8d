use super::common::*;
use crate::evaluation::{
    ConversationEvaluator, Dimension, EvaluationCriteria, RubricEvaluator, Speaker, Transcript,
    Turn,
};

#[test]
fn engine_scores_strong_discovery_call() {
    let evaluator = RubricEvaluator::default();
    let result = evaluator.score(&strong_discovery_call());

    assert_eq!(result.dimensions.len(), 7);
    assert!(result.dimensions.iter().all(|dimension| dimension.score == 9));
    assert_eq!(result.overall_score, 9.0);
    assert!(result.improvements.is_empty());
    assert_eq!(result.strengths.len(), 7);
    assert!(result.summary.starts_with("Overall: excellent (9.0/10)."));
    assert!(result.summary.ends_with("Strongest: Patience. Focus on: Patience."));
}

#[test]
fn engine_reports_dimensions_in_fixed_order() {
    let result = RubricEvaluator::default().score(&strong_discovery_call());
    let keys: Vec<Dimension> = result.dimensions.iter().map(|d| d.key).collect();
    assert_eq!(keys, Dimension::ordered().to_vec());
    assert!(result
        .dimensions
        .iter()
        .all(|d| d.max_score == 10 && !d.feedback.is_empty()));
}

#[test]
fn engine_handles_empty_transcript() {
    let result = RubricEvaluator::default().score(&Transcript::default());

    let talk_ratio = result
        .dimension(Dimension::ClientTalkRatio)
        .expect("talk ratio scored");
    assert_eq!(talk_ratio.score, 5);
    assert!(talk_ratio.feedback.to_lowercase().contains("not enough data"));

    // 9, 3, 5, 4, 5, 6, 4 under default weights
    assert_eq!(result.overall_score, 5.3);
    assert_eq!(result.strengths.len(), 1);
    assert_eq!(result.improvements.len(), 6);
}

#[test]
fn engine_handles_turns_without_words() {
    let transcript = Transcript::new(vec![Turn::trainee(""), Turn::customer("   ")]);
    let result = RubricEvaluator::default().score(&transcript);
    assert_eq!(
        result
            .dimension(Dimension::ClientTalkRatio)
            .map(|d| d.score),
        Some(5)
    );
}

#[test]
fn engine_ignores_unrecognized_speakers() {
    let mut turns = strong_discovery_call().turns().to_vec();
    turns.insert(
        3,
        Turn {
            speaker: Speaker::Unrecognized,
            text: "We offer a guaranteed best deal, trust me.".to_string(),
        },
    );
    let with_noise = Transcript::new(turns);

    let evaluator = RubricEvaluator::default();
    assert_eq!(
        evaluator.score(&with_noise),
        evaluator.score(&strong_discovery_call())
    );
}

#[test]
fn engine_is_idempotent() {
    let evaluator = RubricEvaluator::default();
    let transcript = Transcript::new(vec![
        Turn::trainee("Do you use a CRM? Our product is the best."),
        Turn::customer("We use spreadsheets."),
        Turn::trainee("How much does that cost you?"),
        Turn::customer("Maybe 10 hours per week."),
    ]);

    let first = serde_json::to_string(&evaluator.score(&transcript)).expect("serializes");
    let second = serde_json::to_string(&evaluator.score(&transcript)).expect("serializes");
    assert_eq!(first, second);
}

#[test]
fn overall_score_matches_weighted_mean_under_custom_weights() {
    let criteria = EvaluationCriteria::new([
        (Dimension::Patience, 50),
        (Dimension::VocabularyCompliance, 50),
    ])
    .expect("valid weights");
    let evaluator = RubricEvaluator::new(criteria);

    let transcript = Transcript::new(vec![
        Turn::trainee("We offer a solution, I guarantee it works, trust me."),
        Turn::customer("Okay."),
    ]);
    let result = evaluator.score(&transcript);

    // patience 3, vocabulary 5
    assert_eq!(result.overall_score, 4.0);
    assert!(result.summary.starts_with("Overall: developing (4.0/10)."));
}

#[test]
fn strengths_and_improvements_partition_feedback() {
    let transcript = Transcript::new(vec![
        Turn::trainee("Let me tell you about our platform."),
        Turn::customer("Sure, go ahead, I have a few minutes before my next meeting starts."),
        Turn::trainee("What is your biggest challenge with scheduling?"),
        Turn::customer("Drivers cancel late and we scramble to cover shifts every week."),
    ]);
    let result = RubricEvaluator::default().score(&transcript);

    for dimension in &result.dimensions {
        let in_strengths = result.strengths.contains(&dimension.feedback);
        let in_improvements = result.improvements.contains(&dimension.feedback);
        assert!(
            in_strengths ^ in_improvements,
            "{} feedback must land in exactly one list",
            dimension.dimension
        );
        assert_eq!(in_strengths, dimension.score >= 7);
    }
}

#[test]
fn rubric_evaluator_works_behind_trait_object() {
    let evaluator: Box<dyn ConversationEvaluator> = Box::new(RubricEvaluator::default());
    let result = evaluator
        .evaluate(&strong_discovery_call())
        .expect("rubric never fails");
    assert_eq!(result.overall_score, 9.0);
    assert_eq!(evaluator.criteria(), &EvaluationCriteria::default());
}
