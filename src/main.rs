use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

mod config;
mod llm;
mod prompt;
mod services;
mod util;
mod web;

use crate::config::{AppConfig, CliArgs};
use crate::llm::LlmManager;
use crate::prompt::templates::PromptTemplates;
use crate::util::logging::init_tracing;
use crate::web::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    init_tracing(args.json_logs);

    let config = match AppConfig::new(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Initializing LLM client with backend: {} (sql model: {}, analysis model: {})",
        config.llm.backend, config.llm.sql_model, config.llm.analyze_model
    );
    let llm_manager = LlmManager::new(&config.llm)?;

    let templates = PromptTemplates::new()?;

    let app_state = Arc::new(AppState::new(config.clone(), llm_manager, templates));

    info!("Starting telemetry AI server on {}:{}", config.web.host, config.web.port);
    match web::run_server(config.web, app_state).await {
        Ok(_) => info!("Server stopped gracefully"),
        Err(e) => {
            error!("Server error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
