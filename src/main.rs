//! Domain Modeler server
//!
//! Loads configuration from the environment, wires stores, provider client
//! and services, and serves the REST API.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use domain_modeler::adapters::http::{
    api_router, ActiveLlmConfig, LlmHandlers, ModelingHandlers, RouterOptions,
};
use domain_modeler::adapters::llm::LlmClient;
use domain_modeler::adapters::repositories::{LlmConfigRepository, ModelingWorkspace};
use domain_modeler::adapters::storage::{FileStore, InMemoryStore};
use domain_modeler::application::services::{
    ModelExtractionService, ModelGenerationService, ModelRefinementService,
};
use domain_modeler::config::{AppConfig, StorageBackend, StorageConfig};
use domain_modeler::ports::{KeyValueStore, LlmGateway};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config);
    config.validate().context("Invalid configuration")?;

    info!("Starting Domain Modeler");
    info!(
        log_format = ?config.server.log_format,
        storage = ?config.storage.backend,
        provider = %config.llm.provider,
        "Configuration loaded"
    );
    if !config.llm.has_api_key() {
        info!("No server API key configured; a configuration must be saved through the API");
    }

    // === Dependency Injection ===
    let open_store = |name: &'static str| store_for(&config.storage, name);

    let gateway: Arc<dyn LlmGateway> = Arc::new(
        LlmClient::new(config.llm.client_config()).context("Failed to build LLM client")?,
    );
    let active = ActiveLlmConfig::new(
        LlmConfigRepository::new(open_store(LlmConfigRepository::STORE_NAME)),
        config.llm.default_llm_config(),
    );
    let workspace = ModelingWorkspace::open(open_store);

    let modeling = ModelingHandlers::new(
        Arc::new(ModelExtractionService::new(Arc::clone(&gateway))),
        Arc::new(ModelGenerationService::new(Arc::clone(&gateway))),
        Arc::new(ModelRefinementService::new(Arc::clone(&gateway))),
        workspace,
        active.clone(),
    );
    let llm = LlmHandlers::new(gateway, active);

    let app = api_router(
        llm,
        modeling,
        RouterOptions {
            cors_origins: config.server.cors_origins_list(),
            request_timeout: Some(config.server.request_timeout()),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.json_logs() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

fn store_for(storage: &StorageConfig, name: &'static str) -> Arc<dyn KeyValueStore> {
    match storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryStore::new(name)),
        StorageBackend::File => Arc::new(FileStore::new(&storage.data_dir, name)),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
