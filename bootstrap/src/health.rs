//! Health checks
//!
//! Serves `/health` (liveness), `/ready` (readiness) and `/metrics` over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use nexus_adapter_postgres::check_connection;
use serde::Serialize;
use tracing::info;

use crate::infrastructure::Infrastructure;
use crate::metrics::MetricsRecorder;

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub checks: Vec<ComponentHealth>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            checks: vec![],
        }
    }

    pub fn add_check(&mut self, check: ComponentHealth) {
        if check.status != "healthy" {
            self.status = "unhealthy".to_string();
        }
        self.checks.push(check);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "healthy".to_string(),
            message: None,
        }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "unhealthy".to_string(),
            message: Some(message.into()),
        }
    }
}

pub struct HealthChecker {
    infra: Infrastructure,
}

impl HealthChecker {
    pub fn new(infra: Infrastructure) -> Self {
        Self { infra }
    }

    /// The process is up; dependencies are not consulted
    pub async fn liveness(&self) -> HealthStatus {
        HealthStatus::healthy()
    }

    /// Every configured dependency answers
    pub async fn readiness(&self) -> HealthStatus {
        let mut status = HealthStatus::healthy();

        match self.infra.postgres_pool() {
            Some(pool) => match check_connection(&pool).await {
                Ok(()) => status.add_check(ComponentHealth::healthy("postgres")),
                Err(e) => status.add_check(ComponentHealth::unhealthy("postgres", e.to_string())),
            },
            None => status.add_check(ComponentHealth::healthy("in-memory")),
        }

        status
    }
}

#[derive(Clone)]
struct HealthServerState {
    checker: Arc<HealthChecker>,
    metrics: Arc<MetricsRecorder>,
}

pub struct HealthServer {
    checker: Arc<HealthChecker>,
    metrics: Arc<MetricsRecorder>,
    port: u16,
}

impl HealthServer {
    pub fn new(checker: Arc<HealthChecker>, metrics: Arc<MetricsRecorder>, port: u16) -> Self {
        Self {
            checker,
            metrics,
            port,
        }
    }

    pub fn router(&self) -> Router {
        let state = HealthServerState {
            checker: self.checker.clone(),
            metrics: self.metrics.clone(),
        };

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(state)
    }

    pub async fn serve(self) -> Result<(), std::io::Error> {
        let app = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "Health check HTTP server starting");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await
    }
}

async fn health_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    let status = state.checker.liveness().await;
    (StatusCode::OK, Json(status))
}

async fn ready_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    let status = state.checker.readiness().await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn metrics_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use nexus_config::{AppConfig, ServerConfig, TelemetryConfig};
    use tower::ServiceExt;

    fn server() -> HealthServer {
        let config = AppConfig {
            app_name: "catalog-product".to_string(),
            app_env: "test".to_string(),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 50051,
                health_port: None,
            },
            database: None,
            telemetry: TelemetryConfig::default(),
        };
        let checker = Arc::new(HealthChecker::new(Infrastructure::without_database(config)));
        HealthServer::new(checker, Arc::new(MetricsRecorder::detached()), 0)
    }

    #[test]
    fn test_status_turns_unhealthy() {
        let mut status = HealthStatus::healthy();
        status.add_check(ComponentHealth::healthy("a"));
        assert!(status.is_healthy());
        status.add_check(ComponentHealth::unhealthy("b", "down"));
        assert!(!status.is_healthy());
        assert_eq!(status.checks.len(), 2);
    }

    #[tokio::test]
    async fn test_ready_without_database() {
        let response = server()
            .router()
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["checks"][0]["name"], "in-memory");
    }

    #[tokio::test]
    async fn test_health_and_metrics_endpoints() {
        let router = server().router();

        let health = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let metrics = router
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(metrics.status(), StatusCode::OK);
    }
}
