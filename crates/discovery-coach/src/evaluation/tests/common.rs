use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::evaluation::{JudgeClient, JudgeError, PartitionedTranscript, Transcript, Turn};

pub(super) fn parts(trainee: &[&str], customer: &[&str]) -> PartitionedTranscript {
    let turns = trainee
        .iter()
        .map(|text| Turn::trainee(*text))
        .chain(customer.iter().map(|text| Turn::customer(*text)));
    Transcript::from_iter(turns).partition()
}

/// Discovery call that follows the methodology closely.
pub(super) fn strong_discovery_call() -> Transcript {
    Transcript::new(vec![
        Turn::customer("Hello, this is Dana from Meridian Logistics."),
        Turn::trainee(
            "Thanks for taking the time, Dana. I'm not sure if we can help you yet, but I noticed you opened two new depots this year. Is that still accurate?",
        ),
        Turn::customer(
            "Yes, we opened sites in Leeds and Bristol in spring, and honestly the rollout has stretched our operations team quite thin across all three locations.",
        ),
        Turn::trainee("What has been the most difficult part of running three sites?"),
        Turn::customer(
            "Scheduling drivers. Our planners still build routes by hand in spreadsheets, so every change means phoning around, and we regularly miss delivery windows for our larger retail customers.",
        ),
        Turn::trainee("How does that affect your relationship with those retail customers?"),
        Turn::customer(
            "Two of them have started applying penalty clauses, and one told us directly that they are reviewing other carriers at the end of the quarter if things do not improve.",
        ),
        Turn::trainee(
            "What happens if that account moves to another carrier? How much is that account worth to you?",
        ),
        Turn::customer(
            "It is roughly a fifth of our revenue, so we would have to cut at least one route team and probably delay opening the next depot we had planned for next year.",
        ),
        Turn::trainee("How much does that cost you per month right now in penalties?"),
        Turn::customer(
            "Last month it was about €18,000 in penalties, plus around 40 hours per week of planner overtime that we pay at a premium rate.",
        ),
        Turn::trainee("Perhaps I could ask: what impact does that overtime have on the planners themselves?"),
        Turn::customer(
            "Morale is low. We lost one senior planner already and the others are tired of weekend shifts, which makes the whole situation even more fragile going into peak season.",
        ),
        Turn::trainee("Would it help if route changes reached drivers automatically?"),
        Turn::customer(
            "It would, because most of the phoning around is just relaying changes, and if that disappeared the planners could actually plan instead of firefighting every single afternoon.",
        ),
    ])
}

#[derive(Clone)]
pub(super) struct ScriptedJudge {
    reply: Result<String, String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedJudge {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Arc::default(),
        }
    }

    pub(super) fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Arc::default(),
        }
    }

    pub(super) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

impl JudgeClient for ScriptedJudge {
    fn complete(&self, prompt: &str) -> Result<String, JudgeError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.to_string());
        self.reply.clone().map_err(JudgeError::Unavailable)
    }
}

pub(super) async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json body")
}
