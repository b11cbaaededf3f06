use std::net::SocketAddr;
use tonic::transport::Server;
use tonic_reflection::server::Builder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_grpc::{pb::medi_assist_server::MediAssistServer, ApiKeyInterceptor, MediAssistService};
use api_shared::{auth, FILE_DESCRIPTOR_SET};
use mediassist_core::{CoreConfig, Services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediassist_core=info".parse()?)
                .add_directive("api_grpc=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("MEDIASSIST_GRPC_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:50051".into())
        .parse()?;

    let cfg = CoreConfig::from_env()?;
    let services = Services::from_config(&cfg)?;

    let api_key = auth::api_key_from_env();
    if api_key.is_none() {
        tracing::warn!("API_KEY not set; all gRPC requests will be refused");
    }

    tracing::info!("-- Starting MediAssist gRPC on {}", addr);

    let svc = MediAssistService::new(services);
    let mut server_builder = Server::builder().add_service(MediAssistServer::with_interceptor(
        svc,
        ApiKeyInterceptor::new(api_key),
    ));

    if std::env::var("MEDIASSIST_ENABLE_REFLECTION").unwrap_or_else(|_| "false".to_string())
        == "true"
    {
        let reflection_service = Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()?;
        server_builder = server_builder.add_service(reflection_service);
        tracing::info!("gRPC server reflection enabled");
    } else {
        tracing::info!("gRPC server reflection disabled");
    }

    server_builder.serve(addr).await?;

    Ok(())
}
