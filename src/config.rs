use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub backend: String, // "ollama" or "remote"
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub sql_model: String,
    pub analyze_model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

/// What to do when generated SQL fails the read-only check.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SqlGuardMode {
    Off,
    #[default]
    Warn,
    Reject,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SqlGuardConfig {
    #[serde(default)]
    pub mode: SqlGuardMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub web: WebConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub sql_guard: SqlGuardConfig,
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

const ENV_PREFIX: &str = "TELEMETRY_AI";

impl AppConfig {
    pub fn new(args: &CliArgs) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let mut config_builder = Config::builder()
            .set_default("web.host", defaults.web.host)?
            .set_default("web.port", defaults.web.port as i64)?
            .set_default("llm.backend", defaults.llm.backend)?
            .set_default("llm.sql_model", defaults.llm.sql_model)?
            .set_default("llm.analyze_model", defaults.llm.analyze_model)?
            .set_default("llm.temperature", defaults.llm.temperature as f64)?
            .set_default("llm.timeout_secs", defaults.llm.timeout_secs as i64)?
            .set_default("sql_guard.mode", "warn")?;

        if let Some(config_path) = &args.config {
            config_builder = config_builder.add_source(File::from(config_path.as_path()));
        } else {
            let default_locations = [
                "config.toml",
                "config/config.toml",
                "/etc/telemetry-ai/config.toml",
            ];

            if let Some(location) = default_locations.iter().find(|l| Path::new(l).exists()) {
                config_builder =
                    config_builder.add_source(File::new(location, config::FileFormat::Toml));
            }
        }

        // TELEMETRY_AI__LLM__SQL_MODEL=... overrides llm.sql_model
        config_builder = config_builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: AppConfig = config_builder.build()?.try_deserialize()?;

        if let Some(host) = &args.host {
            config.web.host = host.clone();
        }
        if let Some(port) = args.port {
            config.web.port = port;
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "127.0.0.1".to_string(),
                port: 8001,
            },
            llm: LlmConfig {
                backend: "ollama".to_string(),
                api_url: None,
                api_key: None,
                sql_model: "sqlcoder:7b".to_string(),
                analyze_model: "llama3.1".to_string(),
                temperature: 0.1,
                timeout_secs: 120,
            },
            sql_guard: SqlGuardConfig::default(),
        }
    }
}
