use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use discovery_coach::config::AppConfig;
use discovery_coach::error::AppError;
use discovery_coach::evaluation::{ConversationEvaluator, RubricEvaluator};
use discovery_coach::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;
    for (dimension, weight) in config.criteria.entries() {
        debug!(dimension = dimension.key(), weight, "dimension weight configured");
    }

    let evaluator: Arc<dyn ConversationEvaluator> =
        Arc::new(RubricEvaluator::new(config.criteria.clone()));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: Arc::clone(&readiness),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_service_routes(evaluator)
        .layer(Extension(state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);
    info!(?config.environment, %addr, "discovery coach listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(readiness))
        .await?;
    Ok(())
}

async fn shutdown_signal(readiness: Arc<AtomicBool>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    readiness.store(false, Ordering::Release);
    info!("shutdown requested, draining connections");
}
