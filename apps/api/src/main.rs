//! # PetVax API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Client ───► HTTP (8080) ───► routes ───► PetService ───► SQLite       │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                                         SMTP notifier                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use petvax_api::config::LogSettings;
use petvax_api::notification::{LogNotifier, SmtpNotifier};
use petvax_api::{router, AppConfig, AppState};
use petvax_core::Notifier;
use petvax_db::Database;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        address = %config.bind_address(),
        database = %config.database.path.display(),
        "Starting PetVax API server"
    );

    let db = Database::new(config.db_config())
        .await
        .context("opening database")?;
    let (total, applied) = db.migration_status().await?;
    info!(total, applied, "Database ready");

    let notifier: Arc<dyn Notifier> = if config.notification.enabled {
        info!(host = %config.notification.smtp_host, "Registration emails enabled");
        Arc::new(SmtpNotifier::new(&config.notification).context("configuring SMTP")?)
    } else {
        info!("Registration emails disabled, logging only");
        Arc::new(LogNotifier)
    };

    let app = router(AppState::new(db.clone(), notifier));

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("binding {}", config.bind_address()))?;
    info!(address = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// `RUST_LOG` wins over `log.filter`.
fn init_tracing(settings: &LogSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if settings.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
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
