/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use cinescore::app_config::{Config, LogLevel, API_KEY_ENV_VARS};
use cinescore::errors::AppError;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.provider.model, "gemini-3-flash-preview");
    assert_eq!(config.provider.endpoint, "https://generativelanguage.googleapis.com");
    assert!(config.provider.api_key.is_empty());
    assert_eq!(config.provider.timeout_secs, None);
    assert!((config.analysis.temperature - 0.7).abs() < f32::EPSILON);
    assert!(config.analysis.prompt_template.contains("{title}"));
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Missing API key is not checked locally
    config.provider.api_key = String::new();
    assert!(config.validate().is_ok());

    config.analysis.temperature = 2.5;
    assert!(matches!(config.validate(), Err(AppError::Config(_))));
    config.analysis.temperature = 0.7;

    config.analysis.prompt_template = "No placeholder here".to_string();
    assert!(config.validate().is_err());
    config.analysis.prompt_template = "Review {title}".to_string();
    assert!(config.validate().is_ok());

    config.provider.model = " ".to_string();
    assert!(config.validate().is_err());
    config.provider.model = "gemini-2.5-flash".to_string();

    config.provider.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withNanTemperature_shouldFail() {
    let mut config = Config::default();
    config.analysis.temperature = f32::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{ "provider": { "model": "gemini-2.5-pro", "timeout_secs": 45 }, "log_level": "debug" }"#;

    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.provider.model, "gemini-2.5-pro");
    assert_eq!(config.provider.endpoint, "https://generativelanguage.googleapis.com");
    assert_eq!(config.provider.timeout_secs, Some(45));
    assert!((config.analysis.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_config_serialize_shouldNeverWriteApiKey() -> Result<()> {
    let mut config = Config::default();
    config.provider.api_key = "secret-key".to_string();

    let json = serde_json::to_string(&config)?;

    assert!(!json.contains("secret-key"));
    assert!(!json.contains("api_key"));
    Ok(())
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.provider.model, "gemini-3-flash-preview");
    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.analysis.prompt_template, config.analysis.prompt_template);
    Ok(())
}

#[test]
fn test_loadOrCreate_withExistingFile_shouldReadIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "analysis": { "temperature": 0.3 }, "log_level": "warn" }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert!((config.analysis.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.log_level, LogLevel::Warn);
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_applyEnv_shouldPreferFirstNonEmptyVariable() {
    assert_eq!(API_KEY_ENV_VARS, ["API_KEY", "GEMINI_API_KEY"]);

    let mut config = Config::default();
    config.apply_env_with(|name| match name {
        "API_KEY" => Some("  ".to_string()),
        "GEMINI_API_KEY" => Some("gemini-key".to_string()),
        _ => None,
    });
    assert_eq!(config.provider.api_key, "gemini-key");

    config.apply_env_with(|name| match name {
        "API_KEY" => Some("primary-key".to_string()),
        _ => Some("other".to_string()),
    });
    assert_eq!(config.provider.api_key, "primary-key");
}

#[test]
fn test_applyEnv_withNoVariables_shouldKeepExistingKey() {
    let mut config = Config::default();
    config.provider.api_key = "from-file".to_string();

    config.apply_env_with(|_| None);

    assert_eq!(config.provider.api_key, "from-file");
}

#[test]
fn test_logLevel_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
