use std::net::SocketAddr;
use tonic::transport::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_grpc::{pb::medi_assist_server::MediAssistServer, ApiKeyInterceptor, MediAssistService};
use api_rest::AppState;
use api_shared::auth;
use mediassist_core::{CoreConfig, Services};

/// Main entry point for the MediAssist application
///
/// Starts both gRPC and REST servers concurrently over one shared set of services, so a bed
/// count updated through REST is visible to gRPC callers:
/// - gRPC server on port 50051 (configurable via MEDIASSIST_GRPC_ADDR)
/// - REST server on port 3000 (configurable via MEDIASSIST_REST_ADDR)
///
/// The gRPC server requires authentication via the x-api-key header.
/// Both surfaces gate operations on the caller role in `x-mediassist-role`.
///
/// # Environment Variables
/// - `MEDIASSIST_GRPC_ADDR`: gRPC server address (default: "0.0.0.0:50051")
/// - `MEDIASSIST_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `GENERATION_API_KEY`: key for the hosted generation service (required)
/// - `API_KEY`: API key for gRPC authentication
///
/// # Errors
/// Returns an error if the configuration is invalid or either server fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediassist_run=info".parse()?)
                .add_directive("mediassist_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("api_grpc=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let grpc_addr: SocketAddr = std::env::var("MEDIASSIST_GRPC_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:50051".into())
        .parse()?;
    let rest_addr =
        std::env::var("MEDIASSIST_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::from_env()?;
    let services = Services::from_config(&cfg)?;

    let api_key = auth::api_key_from_env();
    if api_key.is_none() {
        tracing::warn!("API_KEY not set; all gRPC requests will be refused");
    }

    tracing::info!("++ Starting MediAssist gRPC on {}", grpc_addr);
    tracing::info!("++ Starting MediAssist REST on {}", rest_addr);

    let rest_app = api_rest::router(AppState {
        services: services.clone(),
    });

    let rest_server = async move {
        let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
        axum::serve(listener, rest_app).await?;
        Ok::<(), anyhow::Error>(())
    };

    let grpc_server = Server::builder()
        .add_service(MediAssistServer::with_interceptor(
            MediAssistService::new(services),
            ApiKeyInterceptor::new(api_key),
        ))
        .serve(grpc_addr);

    // Run both
    let (rest_result, grpc_result) = tokio::join!(rest_server, grpc_server);
    rest_result?;
    grpc_result?;

    Ok(())
}
