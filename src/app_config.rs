use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::analysis::prompts::{DEFAULT_PROMPT_TEMPLATE, TITLE_PLACEHOLDER};
use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and environment overrides.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Model provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Analysis request settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Environment variables checked for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Gemini provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Model name
    #[serde(default = "default_gemini_model")]
    pub model: String,

    // @field: API key, normally supplied through the environment
    #[serde(default, skip_serializing)]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds, none by default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_key: String::new(),
            endpoint: default_gemini_endpoint(),
            timeout_secs: None,
        }
    }
}

/// Settings for the critical consensus request
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisConfig {
    /// Prompt template sent to the model
    /// Placeholder: {title}
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,

    /// Temperature parameter for text generation (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            prompt_template: default_prompt_template(),
            temperature: default_temperature(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_prompt_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

impl Config {
    /// Load the configuration file, writing a default one if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write default config to file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values.
    ///
    /// The API key is not checked here; a missing key surfaces as a
    /// failed fetch.
    pub fn validate(&self) -> std::result::Result<(), AppError> {
        if !(0.0..=2.0).contains(&self.analysis.temperature) {
            return Err(AppError::Config(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.analysis.temperature
            )));
        }

        if !self.analysis.prompt_template.contains(TITLE_PLACEHOLDER) {
            return Err(AppError::Config(format!(
                "Prompt template must contain the {} placeholder",
                TITLE_PLACEHOLDER
            )));
        }

        if self.provider.model.trim().is_empty() {
            return Err(AppError::Config("Model name must not be empty".to_string()));
        }

        Url::parse(&self.provider.endpoint)
            .map_err(|e| AppError::Config(format!("Invalid endpoint '{}': {}", self.provider.endpoint, e)))?;

        Ok(())
    }

    /// Take the API key from the first non-empty variable in [`API_KEY_ENV_VARS`]
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Same as [`Config::apply_env`] with a custom variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_ENV_VARS.iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty()) {
            self.provider.api_key = key.trim().to_string();
        }
    }
}
