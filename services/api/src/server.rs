use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rewards::config::AppConfig;
use rewards::error::AppError;
use rewards::snapshot::TransactionSnapshot;
use rewards::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.transactions.take() {
        config.snapshot.transactions_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let transactions = match &config.snapshot.transactions_path {
        Some(path) => {
            let loaded = TransactionSnapshot::from_path(path)?;
            info!(count = loaded.len(), path = %path.display(), "transaction snapshot loaded");
            loaded
        }
        None => {
            info!("no snapshot configured, serving an empty transaction set");
            Vec::new()
        }
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        transactions: Arc::new(transactions),
    };

    let app = dashboard_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "rewards dashboard ready");

    axum::serve(listener, app).await?;
    Ok(())
}
