use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parley::{create_router, services::build_llm_client, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Missing credentials fail here, never per request.
    let config = Config::from_env()?;

    tracing::info!("Starting Parley chat and summarization service");
    tracing::info!(
        provider = %config.provider,
        model = %config.provider_settings.model,
        llm_timeout_seconds = config.llm_request_timeout_seconds,
        "Using LLM provider"
    );

    let client = build_llm_client(&config).context("Failed to initialise LLM client")?;
    let app = create_router(AppState::new(client));

    let addr = config.bind_address();
    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
