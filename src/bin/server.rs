//! Standalone module settings API server (without Dioxus frontend)
//! Use this for API-only testing or backend development.
//!
//! Run with: PORT=3003 cargo run --bin server --features server -- --in-memory

use anyhow::Context;
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crm_console::config::ServerConfig;
use crm_console::handlers::{module_settings_router, ModuleSettingsState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting CRM Console API Server (standalone)...");

    let config = ServerConfig::parse();
    let repo = config.build_repository().await?;

    // Browser clients send the role header on writes, so preflight must pass
    let app = module_settings_router(ModuleSettingsState::new(repo))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
