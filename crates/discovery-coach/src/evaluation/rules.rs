use super::classifier::{classify_question, QuestionKind};
use super::criteria::Dimension;
use super::lexicon::{
    contains_any, count_occurrences, CONFIRMING, DISARMING, ENCOURAGED, FORBIDDEN, IMPLICATION,
    MONETIZATION_ASK, MONETIZATION_RESPONSE, QUANTIFICATION, SOLUTION_PITCH,
};
use super::sequence::analyze_sequence;
use super::transcript::PartitionedTranscript;
use super::DimensionScore;

pub(crate) type Scorer = fn(&PartitionedTranscript) -> DimensionScore;

/// Scorers in reporting order. Each one is independent of the others.
pub(crate) const SCORERS: [(Dimension, Scorer); Dimension::COUNT] = [
    (Dimension::Patience, score_patience),
    (Dimension::ImplicationDepth, score_implication_depth),
    (Dimension::ClientTalkRatio, score_talk_ratio),
    (Dimension::QuestionQuality, score_question_quality),
    (Dimension::SpinSequence, score_spin_sequence),
    (Dimension::VocabularyCompliance, score_vocabulary),
    (Dimension::MonetizationQuality, score_monetization),
];

pub(crate) fn score_patience(transcript: &PartitionedTranscript) -> DimensionScore {
    let first_pitch = transcript
        .trainee
        .iter()
        .position(|turn| contains_any(turn, SOLUTION_PITCH));

    match first_pitch {
        Some(index) if index < 3 => DimensionScore::new(
            Dimension::Patience,
            3,
            format!(
                "Solution offered too early (trainee turn {}); uncover the customer's pain before pitching.",
                index + 1
            ),
        ),
        Some(index) if index < 5 => DimensionScore::new(
            Dimension::Patience,
            6,
            format!(
                "Good restraint before pitching at trainee turn {}; explore implications deeper first.",
                index + 1
            ),
        ),
        _ => DimensionScore::new(
            Dimension::Patience,
            9,
            "Excellent patience: discovery came well before any solution talk.",
        ),
    }
}

pub(crate) fn score_implication_depth(transcript: &PartitionedTranscript) -> DimensionScore {
    let implications = transcript
        .trainee
        .iter()
        .filter(|turn| contains_any(turn, IMPLICATION))
        .count();
    let quantified = transcript
        .trainee
        .iter()
        .filter(|turn| contains_any(turn, QUANTIFICATION))
        .count();

    let (score, verdict) = if implications >= 3 && quantified >= 2 {
        (9, "Deep implication work with the impact quantified")
    } else if implications >= 2 || quantified >= 1 {
        (7, "Solid implication questioning; push for broader consequences")
    } else if implications >= 1 {
        (5, "Touched on consequences once; follow up on what the problem leads to")
    } else {
        (3, "No implication questions; ask what the problem affects and what it costs")
    };

    DimensionScore::new(
        Dimension::ImplicationDepth,
        score,
        format!("{verdict} ({implications} implication, {quantified} quantification turns)."),
    )
}

pub(crate) fn score_talk_ratio(transcript: &PartitionedTranscript) -> DimensionScore {
    let trainee_words = word_count(&transcript.trainee);
    let customer_words = word_count(&transcript.customer);
    let total = trainee_words + customer_words;

    if total == 0 {
        return DimensionScore::new(
            Dimension::ClientTalkRatio,
            5,
            "Not enough data to measure the talk ratio.",
        );
    }

    let ratio = customer_words as f64 / total as f64;
    let share = (ratio * 100.0).round();
    let (score, verdict) = if (0.65..=0.80).contains(&ratio) {
        (9, "Ideal balance: the customer did most of the talking")
    } else if (0.50..0.65).contains(&ratio) {
        (7, "Customer talked more than you; keep questions short to open them up further")
    } else if ratio < 0.50 {
        (4, "You are talking too much; ask and then listen")
    } else {
        (6, "Customer is talking a lot; guide the conversation with sharper questions")
    };

    DimensionScore::new(
        Dimension::ClientTalkRatio,
        score,
        format!("{verdict} (customer share {share:.0}%)."),
    )
}

pub(crate) fn score_question_quality(transcript: &PartitionedTranscript) -> DimensionScore {
    let (open, closed) = transcript
        .trainee
        .iter()
        .filter_map(|turn| classify_question(turn))
        .fold((0usize, 0usize), |(open, closed), kind| match kind {
            QuestionKind::Open => (open + 1, closed),
            QuestionKind::Closed => (open, closed + 1),
        });
    let total = open + closed;

    if total == 0 {
        return DimensionScore::new(
            Dimension::QuestionQuality,
            4,
            "No questions asked; discovery depends on open questions.",
        );
    }

    let open_share = open as f64 / total as f64;
    let (score, verdict) = if open_share >= 0.70 {
        (9, "Strong use of open questions")
    } else if open_share >= 0.50 {
        (7, "Good question mix; convert more closed questions into open ones")
    } else {
        (5, "Too many closed questions; start with what, how, or tell me")
    };

    DimensionScore::new(
        Dimension::QuestionQuality,
        score,
        format!("{verdict} ({open} open, {closed} closed)."),
    )
}

pub(crate) fn score_spin_sequence(transcript: &PartitionedTranscript) -> DimensionScore {
    let analysis = analyze_sequence(&transcript.trainee);
    let overuse = analysis.overuse();

    let (score, feedback) = if analysis.classified == 0 {
        (
            5,
            "No recognizable SPIN questions; move from situation to problem, implication, and need-payoff."
                .to_string(),
        )
    } else if analysis.violations == 0 && !overuse {
        (9, "Clean SPIN progression from situation through to payoff.".to_string())
    } else if analysis.violations <= 1 && !overuse {
        (
            7,
            "Mostly sound SPIN flow with one backward jump; stay on the deeper phase once reached."
                .to_string(),
        )
    } else if overuse {
        (
            4,
            format!(
                "Too many situation questions ({}); research the basics and confirm them instead.",
                analysis.situation_count
            ),
        )
    } else {
        (
            5,
            format!(
                "SPIN order broke down {} times; avoid jumping back to earlier phases.",
                analysis.violations
            ),
        )
    };

    DimensionScore::new(Dimension::SpinSequence, score, feedback)
}

pub(crate) fn score_vocabulary(transcript: &PartitionedTranscript) -> DimensionScore {
    let forbidden = occurrences(&transcript.trainee, FORBIDDEN);
    let encouraged = occurrences(&transcript.trainee, ENCOURAGED);
    let disarming = occurrences(&transcript.trainee, DISARMING);
    let confirming = occurrences(&transcript.trainee, CONFIRMING);
    let positive = encouraged + disarming + confirming;

    let (score, feedback) = if forbidden >= 3 {
        (
            3,
            format!("Repeated pushy language ({forbidden} forbidden phrases); drop guarantees and hype."),
        )
    } else if forbidden >= 1 {
        (
            5,
            format!("Avoid pushy language ({forbidden} forbidden phrase(s) used)."),
        )
    } else if positive >= 3 && disarming >= 1 {
        (
            9,
            "Excellent tentative, disarming vocabulary throughout.".to_string(),
        )
    } else if positive >= 2 {
        (
            7,
            format!("Good tentative vocabulary ({positive} preferred phrases); add a disarming opener."),
        )
    } else {
        (
            6,
            "Neutral vocabulary; use tentative phrasing like perhaps or might.".to_string(),
        )
    };

    DimensionScore::new(Dimension::VocabularyCompliance, score, feedback)
}

pub(crate) fn score_monetization(transcript: &PartitionedTranscript) -> DimensionScore {
    let asks = transcript
        .trainee
        .iter()
        .filter(|turn| contains_any(turn, MONETIZATION_ASK))
        .count();
    let received = transcript
        .customer
        .iter()
        .filter(|turn| contains_any(turn, MONETIZATION_RESPONSE))
        .count();

    let (score, verdict) = if asks >= 2 && received >= 1 {
        (9, "Excellent monetization: the pain was put into numbers")
    } else if asks >= 1 && received >= 1 {
        (7, "Got a number on the problem; ask again to size the full cost")
    } else if asks >= 1 {
        (6, "Asked to quantify but got no figure back; rephrase until the customer names one")
    } else {
        (4, "Never quantified the pain; ask what the problem costs in money or hours")
    };

    DimensionScore::new(
        Dimension::MonetizationQuality,
        score,
        format!("{verdict} ({asks} asks, {received} quantified answers)."),
    )
}

fn occurrences(turns: &[String], phrases: &[&str]) -> usize {
    turns
        .iter()
        .map(|turn| count_occurrences(turn, phrases))
        .sum()
}

fn word_count(turns: &[String]) -> usize {
    turns.iter().map(|turn| turn.split_whitespace().count()).sum()
}
