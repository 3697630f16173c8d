use super::classifier::{classify_spin_phase, SpinPhase};

/// More situation questions than this counts as overuse.
pub const SITUATION_LIMIT: usize = 3;

/// Phase progression observed across the trainee's turns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceAnalysis {
    pub phases: Vec<SpinPhase>,
    pub classified: usize,
    pub violations: usize,
    pub situation_count: usize,
}

impl SequenceAnalysis {
    pub fn overuse(&self) -> bool {
        self.situation_count > SITUATION_LIMIT
    }
}

/// Track the deepest phase reached and flag regressions of more than one step.
pub fn analyze_sequence<S: AsRef<str>>(turns: &[S]) -> SequenceAnalysis {
    let mut analysis = SequenceAnalysis::default();
    let mut max_reached: Option<u8> = None;

    for turn in turns {
        let phase = classify_spin_phase(turn.as_ref());
        analysis.phases.push(phase);

        let Some(ordinal) = phase.ordinal() else {
            continue;
        };

        analysis.classified += 1;
        if phase == SpinPhase::Situation {
            analysis.situation_count += 1;
        }

        if let Some(max) = max_reached {
            if ordinal + 1 < max {
                analysis.violations += 1;
            }
        }
        max_reached = Some(max_reached.map_or(ordinal, |max| max.max(ordinal)));
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_step_regression_is_tolerated() {
        let analysis = analyze_sequence(&[
            "how many sites do you run?",
            "what is the biggest challenge?",
            "what impact does that have on delivery?",
            "is that a concern for the board?",
        ]);

        assert_eq!(analysis.classified, 4);
        assert_eq!(analysis.violations, 0);
    }

    #[test]
    fn jumping_back_two_phases_is_a_violation() {
        let analysis = analyze_sequence(&[
            "what impact does the outage have?",
            "how many servers are there?",
            "would it help to have a standby?",
            "what system do you use?",
        ]);

        assert_eq!(
            analysis.phases,
            vec![
                SpinPhase::Implication,
                SpinPhase::Situation,
                SpinPhase::NeedPayoff,
                SpinPhase::Situation
            ]
        );
        assert_eq!(analysis.violations, 2);
        assert_eq!(analysis.situation_count, 2);
        assert!(!analysis.overuse());
    }

    #[test]
    fn unclassified_turns_do_not_move_progression() {
        let analysis = analyze_sequence(&["hello there", "thanks for your time"]);
        assert_eq!(analysis.classified, 0);
        assert_eq!(analysis.phases, vec![SpinPhase::Other, SpinPhase::Other]);
    }
}
