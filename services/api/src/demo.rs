use crate::infra::{load_transcript, parse_weights};
use clap::Args;
use discovery_coach::config::AppConfig;
use discovery_coach::error::AppError;
use discovery_coach::evaluation::{
    ConversationEvaluator, EvaluationCriteria, EvaluationResult, RubricEvaluator, Transcript, Turn,
};
use std::path::PathBuf;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to a JSON array of `{"speaker", "text"}` turns
    #[arg(long)]
    pub(crate) transcript: PathBuf,
    /// Override dimension weights, e.g. `patience=50,implication_depth=50`
    #[arg(long, value_parser = parse_weights)]
    pub(crate) weights: Option<EvaluationCriteria>,
    /// Pretty-print the JSON result
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override dimension weights for the sample evaluation
    #[arg(long, value_parser = parse_weights)]
    pub(crate) weights: Option<EvaluationCriteria>,
    /// Print the raw JSON result instead of the report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let criteria = resolve_criteria(args.weights)?;
    let transcript = load_transcript(&args.transcript)?;
    if transcript.is_empty() {
        warn!(path = %args.transcript.display(), "transcript has no turns");
    }

    let result = RubricEvaluator::new(criteria).evaluate(&transcript)?;
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let criteria = resolve_criteria(args.weights)?;
    let evaluator = RubricEvaluator::new(criteria);
    let transcript = sample_conversation();
    let result = evaluator.evaluate(&transcript)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Discovery coaching demo");
    println!("\nTranscript");
    for turn in transcript.turns() {
        println!("  {}: {}", turn.speaker.label(), turn.text);
    }
    render_report(&result, evaluator.criteria());
    Ok(())
}

fn resolve_criteria(weights: Option<EvaluationCriteria>) -> Result<EvaluationCriteria, AppError> {
    match weights {
        Some(criteria) => Ok(criteria),
        None => Ok(AppConfig::load()?.criteria),
    }
}

pub(crate) fn render_report(result: &EvaluationResult, criteria: &EvaluationCriteria) {
    println!("\nOverall score: {:.1}/10", result.overall_score);
    println!("\nDimensions");
    for dimension in &result.dimensions {
        println!(
            "  {:<22} {:>2}/{} (weight {:>2}%)  {}",
            dimension.dimension,
            dimension.score,
            dimension.max_score,
            criteria.weight(dimension.key),
            dimension.feedback
        );
    }

    if !result.strengths.is_empty() {
        println!("\nStrengths");
        for strength in &result.strengths {
            println!("- {}", strength);
        }
    }

    if !result.improvements.is_empty() {
        println!("\nImprovements");
        for improvement in &result.improvements {
            println!("- {}", improvement);
        }
    }

    println!("\n{}", result.summary);
}

fn sample_conversation() -> Transcript {
    Transcript::new(vec![
        Turn::customer("Thanks for calling, what is this about?"),
        Turn::trainee("I noticed you recently moved to a new warehouse. What prompted the move?"),
        Turn::customer(
            "We outgrew the old building and needed more loading bays, but the move has been messy for our inventory team.",
        ),
        Turn::trainee("What impact has that had on order accuracy?"),
        Turn::customer(
            "Picking errors went up noticeably, maybe 4% of orders, and customers are calling in to complain.",
        ),
        Turn::trainee("How much does each of those errors cost you?"),
        Turn::customer("Roughly $35 per return once you count shipping both ways."),
    ])
}
