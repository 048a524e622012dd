// src/state.rs
// Shared application state, assembled once at startup

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    companion::{CompanionTables, ResponseResolver},
    config::CompanionConfig,
    llm::{LlmProvider, OpenAiProvider},
    store::CompanionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub store: CompanionStore,
    pub resolver: Arc<ResponseResolver>,
    pub config: Arc<CompanionConfig>,
}

impl AppState {
    pub fn new(store: CompanionStore, resolver: Arc<ResponseResolver>, config: Arc<CompanionConfig>) -> Self {
        Self { store, resolver, config }
    }
}

/// Built-in tables, or the TOML file named by `responses_path`.
pub fn load_tables(config: &CompanionConfig) -> Result<CompanionTables> {
    match &config.responses_path {
        Some(path) => {
            let tables = CompanionTables::load(Path::new(path))
                .with_context(|| format!("Failed to load response tables from {path}"))?;
            info!("Response tables loaded from {}", path);
            Ok(tables)
        }
        None => Ok(CompanionTables::builtin()),
    }
}

/// The configured model provider, if an API key is present.
pub fn build_provider(config: &CompanionConfig) -> Result<Option<Arc<dyn LlmProvider>>> {
    let Some(api_key) = &config.openai_api_key else {
        warn!("OPENAI_API_KEY not set - replies will use the fallback tables");
        return Ok(None);
    };

    let provider = OpenAiProvider::new(
        api_key.clone(),
        config.openai_base_url.clone(),
        config.model.clone(),
        config.provider_timeout(),
    )
    .context("Failed to initialize OpenAI provider")?;

    info!("LLM provider: openai (model={})", provider.model());
    let provider: Arc<dyn LlmProvider> = Arc::new(provider);
    Ok(Some(provider))
}

pub fn build_resolver(config: &CompanionConfig, provider: Option<Arc<dyn LlmProvider>>) -> Result<ResponseResolver> {
    let tables = Arc::new(load_tables(config)?);
    Ok(ResponseResolver::new(tables, provider).with_limits(config.generation_limits()))
}

/// Assemble the full state from config and a migrated pool.
pub fn create_app_state(config: CompanionConfig, pool: SqlitePool) -> Result<AppState> {
    let provider = build_provider(&config)?;
    let resolver = build_resolver(&config, provider)?;

    Ok(AppState::new(
        CompanionStore::new(pool),
        Arc::new(resolver),
        Arc::new(config),
    ))
}
