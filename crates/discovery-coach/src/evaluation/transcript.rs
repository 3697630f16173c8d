use serde::{Deserialize, Serialize};

/// Role attached to a turn by the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    #[serde(alias = "user")]
    Trainee,
    #[serde(alias = "assistant")]
    SimulatedCustomer,
    #[serde(other)]
    Unrecognized,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Trainee => "Salesperson",
            Speaker::SimulatedCustomer => "Customer",
            Speaker::Unrecognized => "Unknown",
        }
    }
}

/// One utterance in a practice session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(alias = "role")]
    pub speaker: Speaker,
    #[serde(alias = "content")]
    pub text: String,
}

impl Turn {
    pub fn trainee(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Trainee,
            text: text.into(),
        }
    }

    pub fn customer(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::SimulatedCustomer,
            text: text.into(),
        }
    }
}

/// Ordered, immutable record of a complete practice session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Split turns by speaker, normalizing text for phrase matching.
    pub fn partition(&self) -> PartitionedTranscript {
        let mut trainee = Vec::new();
        let mut customer = Vec::new();

        for turn in &self.turns {
            let normalized = turn.text.trim().to_lowercase();
            match turn.speaker {
                Speaker::Trainee => trainee.push(normalized),
                Speaker::SimulatedCustomer => customer.push(normalized),
                Speaker::Unrecognized => {}
            }
        }

        PartitionedTranscript { trainee, customer }
    }

    /// Plain-text rendering used when the transcript is handed to a judge model.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .filter(|turn| turn.speaker != Speaker::Unrecognized)
            .map(|turn| format!("{}: {}", turn.speaker.label(), turn.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl From<Vec<Turn>> for Transcript {
    fn from(turns: Vec<Turn>) -> Self {
        Self::new(turns)
    }
}

impl FromIterator<Turn> for Transcript {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Trainee and customer turns, lowercased and trimmed, in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedTranscript {
    pub trainee: Vec<String>,
    pub customer: Vec<String>,
}
