use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryPlacementRepository};
use crate::routes::with_placement_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use placement_policy::config::AppConfig;
use placement_policy::error::AppError;
use placement_policy::placement::{PlacementService, PolicyConfig};
use placement_policy::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryPlacementRepository::from_seed(&config.data));
    let placement_service = Arc::new(PlacementService::new(repository, PolicyConfig::default())?);
    info!(
        statistics = ?placement_service.statistics(),
        "default policy configuration initialised"
    );

    let app = with_placement_routes(placement_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "placement policy service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
