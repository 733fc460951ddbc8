//! Reprise HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use reprise::config::Config;
use reprise::{
    AnswerEngine, AzureEmbeddingClient, AzureGenerationClient, LookupConfig, QdrantIndex,
    RefusalPolicy, SearchGrounding,
};
use reprise_server::gateway::{GatewayState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██████╗ ███████╗██████╗ ██████╗ ██╗███████╗███████╗
██╔══██╗██╔════╝██╔══██╗██╔══██╗██║██╔════╝██╔════╝
██████╔╝█████╗  ██████╔╝██████╔╝██║███████╗█████╗
██╔══██╗██╔══╝  ██╔═══╝ ██╔══██╗██║╚════██║██╔══╝
██║  ██║███████╗██║     ██║  ██║██║███████║███████╗
╚═╝  ╚═╝╚══════╝╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚══════╝

        ASK. CACHE. REUSE.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reprise=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        collection = %config.collection_name,
        "Reprise starting"
    );

    let vector_index = Arc::new(QdrantIndex::new(&config.qdrant_url).await?);

    let embedder = Arc::new(AzureEmbeddingClient::new(
        &config.aoai_endpoint,
        &config.aoai_api_key,
        &config.aoai_embedding_deployment,
    ));

    let grounding = SearchGrounding::new(
        &config.search_endpoint,
        &config.search_api_key,
        &config.search_index,
    );
    let generator = Arc::new(AzureGenerationClient::new(
        &config.aoai_endpoint,
        &config.aoai_api_key,
        &config.aoai_deployment,
        grounding,
    ));

    let lookup_config = LookupConfig::default()
        .collection_name(&config.collection_name)
        .match_units(config.match_units);

    let engine = AnswerEngine::new(
        embedder,
        generator,
        vector_index,
        lookup_config,
        RefusalPolicy::default(),
    )?;
    engine.ensure_collection().await?;

    let state = GatewayState::new(Arc::new(engine));
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Reprise shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("REPRISE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
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
