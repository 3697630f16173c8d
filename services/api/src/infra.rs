use discovery_coach::error::AppError;
use discovery_coach::evaluation::{EvaluationCriteria, Transcript};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reads a transcript stored as a JSON array of `{speaker, text}` turns.
pub(crate) fn load_transcript(path: &Path) -> Result<Transcript, AppError> {
    let file = File::open(path)?;
    let transcript = serde_json::from_reader(BufReader::new(file))?;
    Ok(transcript)
}

pub(crate) fn parse_weights(raw: &str) -> Result<EvaluationCriteria, String> {
    EvaluationCriteria::from_spec(raw).map_err(|err| format!("invalid weights '{raw}' ({err})"))
}
