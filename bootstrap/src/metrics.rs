//! Prometheus metrics
//!
//! Counters and histograms are recorded through the `metrics` facade; the
//! recorder installed here renders them for the `/metrics` endpoint.

use std::time::{Duration, Instant};

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use nexus_adapter_postgres::PoolStatus;
use nexus_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::debug;

pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// Install the Prometheus recorder as the global `metrics` recorder
    pub fn install() -> AppResult<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| AppError::internal(format!("Failed to install Prometheus recorder: {}", e)))?;

        Ok(Self { handle })
    }

    /// A recorder that is not registered globally; renders only what is
    /// recorded through it directly
    pub fn detached() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        Self {
            handle: recorder.handle(),
        }
    }

    pub fn render(&self) -> String {
        self.handle.render()
    }
}

pub fn record_grpc_request(service: &str, method: &str, status: &str, duration_ms: f64) {
    counter!(
        "grpc_requests_total",
        "service" => service.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "grpc_request_duration_ms",
        "service" => service.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(duration_ms);
}

pub fn record_db_query(operation: &str, table: &str, duration_ms: f64, success: bool) {
    counter!(
        "db_queries_total",
        "operation" => operation.to_string(),
        "table" => table.to_string(),
        "success" => success.to_string()
    )
    .increment(1);
    histogram!(
        "db_query_duration_ms",
        "operation" => operation.to_string(),
        "table" => table.to_string(),
        "success" => success.to_string()
    )
    .record(duration_ms);
}

pub fn record_postgres_pool_metrics(status: &PoolStatus) {
    gauge!("postgres_pool_size").set(f64::from(status.size));
    gauge!("postgres_pool_idle").set(f64::from(status.idle));
    gauge!("postgres_pool_active").set(f64::from(status.active));
    gauge!("postgres_pool_utilization").set(status.utilization());
}

/// Times one RPC
pub struct RequestTimer {
    start: Instant,
    service: &'static str,
    method: &'static str,
}

impl RequestTimer {
    pub fn new(service: &'static str, method: &'static str) -> Self {
        Self {
            start: Instant::now(),
            service,
            method,
        }
    }

    pub fn finish(self, status: &str) {
        let duration = self.start.elapsed().as_secs_f64() * 1000.0;
        record_grpc_request(self.service, self.method, status, duration);
    }

    /// Finish with `"ok"` or the gRPC code of the error
    pub fn finish_with<T>(self, result: &Result<T, tonic::Status>) {
        match result {
            Ok(_) => self.finish("ok"),
            Err(status) => self.finish(&format!("{:?}", status.code())),
        }
    }
}

/// Times one database statement
pub struct DbQueryTimer {
    start: Instant,
    operation: &'static str,
    table: &'static str,
}

impl DbQueryTimer {
    pub fn new(operation: &'static str, table: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
            table,
        }
    }

    pub fn finish(self, success: bool) {
        let duration = self.start.elapsed().as_secs_f64() * 1000.0;
        record_db_query(self.operation, self.table, duration, success);
    }
}

/// Samples pool usage on an interval until the task is aborted
pub fn spawn_pool_metrics_collector(
    pool: PgPool,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let status = PoolStatus::of(&pool);
            record_postgres_pool_metrics(&status);
            debug!(
                size = status.size,
                idle = status.idle,
                active = status.active,
                "Pool metrics collected"
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_recorder_renders() {
        let recorder = MetricsRecorder::detached();
        RequestTimer::new("ProductService", "GetProduct").finish("ok");
        // the global facade is not wired to a detached recorder
        assert!(!recorder.render().contains("grpc_requests_total"));
    }

    #[test]
    fn test_timers_without_recorder_are_noops() {
        RequestTimer::new("ProductService", "GetProduct").finish("ok");
        DbQueryTimer::new("select", "product").finish(true);
        RequestTimer::new("ProductService", "GetProduct")
            .finish_with::<()>(&Err(tonic::Status::not_found("missing")));
    }
}
