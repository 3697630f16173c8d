use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::criteria::Dimension;
use super::transcript::Transcript;
use super::{ConversationEvaluator, EvaluationError};

pub(crate) type SharedEvaluator = Arc<dyn ConversationEvaluator>;

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluationRequest {
    pub(crate) transcript: Transcript,
}

#[derive(Debug, Serialize)]
pub(crate) struct DimensionView {
    pub(crate) key: Dimension,
    pub(crate) name: &'static str,
    pub(crate) weight: u32,
}

/// Router builder exposing the evaluation endpoints.
pub fn evaluation_router(evaluator: Arc<dyn ConversationEvaluator>) -> Router {
    Router::new()
        .route("/api/v1/evaluations", post(evaluate_handler))
        .route("/api/v1/evaluations/dimensions", get(dimensions_handler))
        .with_state(evaluator)
}

pub(crate) async fn evaluate_handler(
    State(evaluator): State<SharedEvaluator>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response {
    if request.transcript.is_empty() {
        let payload = json!({ "error": "transcript cannot be empty" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    // Judge clients may block on network I/O.
    let outcome =
        tokio::task::spawn_blocking(move || evaluator.evaluate(&request.transcript)).await;

    match outcome {
        Ok(Ok(result)) => (StatusCode::OK, axum::Json(result)).into_response(),
        Ok(Err(EvaluationError::Judge(error))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            error!(%join_error, "evaluation task failed");
            let payload = json!({ "error": "evaluation failed" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn dimensions_handler(State(evaluator): State<SharedEvaluator>) -> Response {
    let dimensions: Vec<DimensionView> = evaluator
        .criteria()
        .entries()
        .map(|(key, weight)| DimensionView {
            key,
            name: key.label(),
            weight,
        })
        .collect();

    (
        StatusCode::OK,
        axum::Json(json!({ "dimensions": dimensions })),
    )
        .into_response()
}
