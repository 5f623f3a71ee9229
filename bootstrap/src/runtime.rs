//! Process-wide runtime setup

use nexus_config::AppConfig;
use nexus_telemetry::{init_tracing, init_tracing_json};
use tracing::{error, info, warn};

/// Install tracing according to the configuration
pub fn init_runtime(config: &AppConfig) {
    let installed = if config.json_logs() {
        init_tracing_json(&config.telemetry.log_level)
    } else {
        init_tracing(&config.telemetry.log_level)
    };

    if let Err(e) = installed {
        // a subscriber is already installed; keep it
        warn!(error = %e, "Tracing already initialized");
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
