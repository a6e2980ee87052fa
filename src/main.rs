use tracing_subscriber::EnvFilter;

use strings_api::api;
use strings_api::config::Config;
use strings_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Max value length: {} characters", config.max_value_length);
    match &config.store.base_url {
        Some(url) if config.store.is_remote() => {
            tracing::info!("Store: table '{}' at {url}", config.store.table)
        }
        _ => tracing::info!("Store: in-memory"),
    }

    let state = AppState::new(config.clone())?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
