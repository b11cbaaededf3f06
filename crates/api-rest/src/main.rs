//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server (with
//! OpenAPI/Swagger UI). The workspace's main `mediassist-run` binary runs both gRPC and REST
//! concurrently.

use api_rest::{router, AppState};
use mediassist_core::{CoreConfig, Services};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the MediAssist REST API server
///
/// # Environment Variables
/// - `MEDIASSIST_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `GENERATION_API_KEY`: Key for the hosted generation service (required)
/// - `GENERATION_BASE_URL`, `GENERATION_MODEL`, `GENERATION_TIMEOUT_SECS`: optional overrides
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the generation settings are missing or invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("mediassist_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDIASSIST_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting MediAssist REST API on {}", addr);

    let cfg = CoreConfig::from_env()?;
    let state = AppState {
        services: Services::from_config(&cfg)?,
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
