use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use discovery_coach::evaluation::{evaluation_router, ConversationEvaluator};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_service_routes(evaluator: Arc<dyn ConversationEvaluator>) -> axum::Router {
    evaluation_router(evaluator)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Acquire) {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use discovery_coach::evaluation::RubricEvaluator;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn service(ready: bool) -> axum::Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_service_routes(Arc::new(RubricEvaluator::default())).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body collects");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_tracks_startup_flag() {
        let request = || {
            Request::builder()
                .uri("/ready")
                .body(Body::empty())
                .expect("request builds")
        };

        let response = service(false).oneshot(request()).await.expect("responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["status"], "initializing");

        let response = service(true).oneshot(request()).await.expect("responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let request = Request::builder()
            .uri("/metrics")
            .body(Body::empty())
            .expect("request builds");
        let response = service(true).oneshot(request).await.expect("responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn evaluation_routes_are_mounted() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/evaluations")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "transcript": [
                        {"speaker": "trainee", "text": "What prompted the move?"},
                        {"speaker": "simulated_customer", "text": "We outgrew the building."}
                    ]
                })
                .to_string(),
            ))
            .expect("request builds");
        let response = service(true).oneshot(request).await.expect("responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["dimensions"].as_array().map(Vec::len), Some(7));

        let request = Request::builder()
            .uri("/api/v1/evaluations/dimensions")
            .body(Body::empty())
            .expect("request builds");
        let response = service(true).oneshot(request).await.expect("responds");
        let body = body_json(response).await;
        assert_eq!(body["dimensions"][0]["key"], "patience");
        assert_eq!(body["dimensions"][0]["weight"], 25);
    }
}
