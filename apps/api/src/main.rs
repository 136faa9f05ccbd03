mod bot;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod routes;
mod state;
#[cfg(test)]
mod test_fixtures;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::bot::connector::{AppCredentials, ConnectorClient};
use crate::config::Config;
use crate::llm_client::OpenAiClient;
use crate::matching::uploads::UploadStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV matcher API v{}", env!("CARGO_PKG_VERSION"));

    // Upload drop zone, created once
    let uploads = UploadStore::open(&config.upload_dir, config.upload_retention).with_context(
        || {
            format!(
                "Failed to create upload directory {}",
                config.upload_dir.display()
            )
        },
    )?;
    info!(
        "Upload directory ready at {} (retention: {:?})",
        uploads.dir().display(),
        config.upload_retention
    );

    // Completion client
    let llm = OpenAiClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        Duration::from_secs(config.llm_timeout_secs),
    )
    .context("Failed to build completion client")?;
    info!("Completion client initialized (model: {})", llm_client::MODEL);

    // Bot Framework connector
    let credentials = match (&config.microsoft_app_id, &config.microsoft_app_password) {
        (Some(app_id), Some(app_password)) => Some(AppCredentials {
            app_id: app_id.clone(),
            app_password: app_password.clone(),
        }),
        _ => None,
    };
    if credentials.is_none() {
        info!("No Microsoft app credentials configured; bot replies are sent unauthenticated");
    }
    let connector = ConnectorClient::new(credentials).context("Failed to build bot connector")?;

    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        uploads,
        bot: Arc::new(connector),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
