use crate::config::AppConfig;
use crate::llm::LlmManager;
use crate::prompt::templates::PromptTemplates;

/// Shared application state for the web server
///
/// Read-only after startup; every request works on its own data.
pub struct AppState {
    pub config: AppConfig,
    pub llm_manager: LlmManager,
    pub templates: PromptTemplates,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, llm_manager: LlmManager, templates: PromptTemplates) -> Self {
        Self {
            config,
            llm_manager,
            templates,
            startup_time: chrono::Utc::now(),
        }
    }
}
