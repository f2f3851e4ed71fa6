//! Dental Practice Core - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin dental-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 API_DATABASE_URL=postgres://... cargo run --bin dental-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_AUTH_USERNAME` / `API_AUTH_PASSWORD` - Staff credentials for
//!   `POST /auth/token`; when unset the endpoint is disabled
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_INTAKE_API_KEY` - Static key for the programmatic intake endpoint
//! * `API_UPLOAD_DIR` - Directory for uploaded x-ray files (default: ./uploads)
//! * `API_SIMULATE_ADJUDICATION` - Run the simulated adjudicator (default: false)
//! * `API_SMTP_HOST` / `API_SMTP_USERNAME` / `API_SMTP_PASSWORD` - SMTP relay;
//!   when unset, outbound mail is recorded locally instead of sent
//! * `API_FROM_ADDRESS` / `API_CLAIMS_INBOX` - Mail addressing
//! * `API_MODEL_PATH` - ONNX abscess model (only with the `onnx-model` feature)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::{Adjudicator, ClaimsWorkflow, NullAdjudicator, SimulatedAdjudicator};
use domain_imaging::{AbscessClassifier, StubClassifier};
use infra_db::{create_pool_from_url, run_migrations};
use infra_notify::{Notifier, RecordingNotifier, SmtpNotifier};
use interface_api::{config::ApiConfig, create_router, Dependencies};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().unwrap_or_default();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Dental Practice Core API Server"
    );

    let pool = create_pool_from_url(&config.database_url)
        .await
        .context("database connection failed")?;
    run_migrations(&pool).await.context("migrations failed")?;

    let dependencies = Dependencies {
        classifier: build_classifier(&config),
        notifier: build_notifier(&config)?,
        workflow: ClaimsWorkflow::new(build_adjudicator(&config)),
    };

    let app = create_router(pool, config.clone(), dependencies);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("invalid server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Picks the x-ray classifier for this deployment
///
/// With the `onnx-model` feature and `API_MODEL_PATH` set, inference runs
/// against the bundled model. Otherwise classification is unavailable and
/// every prediction is the sentinel.
fn build_classifier(config: &ApiConfig) -> Arc<dyn AbscessClassifier> {
    #[cfg(feature = "onnx-model")]
    if let Some(model_path) = &config.model_path {
        match domain_imaging::OnnxAbscessClassifier::load(std::path::Path::new(model_path)) {
            Ok(classifier) => {
                tracing::info!(model = %model_path, "ONNX abscess classifier loaded");
                return Arc::new(classifier);
            }
            Err(e) => {
                tracing::warn!(model = %model_path, error = %e, "model load failed; classification unavailable");
            }
        }
    }

    #[cfg(not(feature = "onnx-model"))]
    if config.model_path.is_some() {
        tracing::warn!("API_MODEL_PATH set but the onnx-model feature is not compiled in");
    }

    Arc::new(StubClassifier::failing())
}

/// Picks the notifier: SMTP when configured, a local recorder otherwise
fn build_notifier(config: &ApiConfig) -> anyhow::Result<Arc<dyn Notifier>> {
    match config.notify_config() {
        Some(notify_config) => {
            let notifier =
                SmtpNotifier::new(&notify_config).context("SMTP notifier setup failed")?;
            tracing::info!(host = %notify_config.smtp_host, "SMTP notifier configured");
            Ok(Arc::new(notifier))
        }
        None => {
            tracing::warn!("no SMTP host configured; outbound mail will be recorded, not sent");
            Ok(Arc::new(RecordingNotifier::new()))
        }
    }
}

/// Picks the adjudicator per deployment configuration
fn build_adjudicator(config: &ApiConfig) -> Arc<dyn Adjudicator> {
    if config.simulate_adjudication {
        tracing::warn!("simulated adjudication enabled; claim decisions are NOT from an insurer");
        Arc::new(SimulatedAdjudicator)
    } else {
        Arc::new(NullAdjudicator)
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
