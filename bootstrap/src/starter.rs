//! Service starter

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use nexus_config::AppConfig;
use nexus_errors::AppResult;
use tonic::service::RoutesBuilder;
use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::health::{HealthChecker, HealthServer};
use crate::infrastructure::Infrastructure;
use crate::metrics::{MetricsRecorder, spawn_pool_metrics_collector};
use crate::runtime::{init_runtime, shutdown_signal};

const POOL_METRICS_INTERVAL: Duration = Duration::from_secs(15);

/// Run a gRPC service.
///
/// 1. load configuration from `config_dir`
/// 2. initialize tracing and the Prometheus recorder
/// 3. connect infrastructure (database pool, with retry)
/// 4. start the HTTP health server and the pool metrics collector
/// 5. let `register` add the service's gRPC services
/// 6. serve until Ctrl+C / SIGTERM
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     nexus_bootstrap::run_server("config", |infra, mut routes| async move {
///         routes.add_service(MyServiceServer::new(MyService::new(infra)));
///         Ok(routes)
///     })
///     .await
/// }
/// ```
pub async fn run_server<F, Fut>(
    config_dir: &str,
    register: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure, RoutesBuilder) -> Fut,
    Fut: Future<Output = AppResult<RoutesBuilder>>,
{
    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);
    info!("Starting {} service", config.app_name);

    let metrics = Arc::new(MetricsRecorder::install()?);
    let infra = Infrastructure::from_config(config.clone()).await?;

    let pool_collector = infra
        .postgres_pool()
        .map(|pool| spawn_pool_metrics_collector(pool, POOL_METRICS_INTERVAL));

    let health_server = HealthServer::new(
        Arc::new(HealthChecker::new(infra.clone())),
        metrics,
        config.server.health_port(),
    );
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.serve().await {
            error!("Health server error: {}", e);
        }
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let routes = register(infra, RoutesBuilder::default()).await?;

    info!(%addr, "gRPC server starting");

    Server::builder()
        .layer(TraceLayer::new_for_grpc())
        .add_routes(routes.routes())
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    health_handle.abort();
    if let Some(handle) = pool_collector {
        handle.abort();
    }

    info!("Service stopped");
    Ok(())
}
