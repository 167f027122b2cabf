/// Terminal client configuration
use jotter_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "jotter.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Backend URL is required (set JOTTER_BACKEND_URL or [backend] url)")]
    MissingBackendUrl,

    #[error("{0}")]
    InvalidBackendUrl(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackendSettings {
    /// Base URL of the notes API
    #[serde(default)]
    pub url: String,

    /// User-Agent override (`JOTTER_BACKEND_AGENT`)
    #[serde(default)]
    pub agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogSettings {
    /// tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "jotter_cli=info,jotter_client=info".to_string()
}

/// `JOTTER_SECTION_KEY` sets `section.key`; keys are single words
fn environment() -> config::Environment {
    config::Environment::with_prefix("JOTTER")
        .separator("_")
        .try_parsing(true)
}

impl CliConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise `jotter.toml` in the working
    /// directory is read when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(
                    config::File::new(&path.to_string_lossy(), config::FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with JOTTER_)
        settings = settings.add_source(environment());

        let config = settings
            .build()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Apply a command-line override of the backend URL
    pub fn with_backend_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.backend.url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.url.trim().is_empty() {
            return Err(ConfigError::MissingBackendUrl);
        }
        self.client_config()
            .validate()
            .map_err(|e| ConfigError::InvalidBackendUrl(e.to_string()))
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.backend.url.clone());
        match &self.backend.agent {
            Some(agent) => config.with_user_agent(agent.clone()),
            None => config,
        }
    }
}
