//! Configuration loader for the `.research-kit/` directory.
//!
//! Settings come from `.research-kit/config.toml`, then environment
//! variables override individual keys:
//! - `RESEARCH_KIT_SERVICE_URL`
//! - `RESEARCH_KIT_TIMEOUT_SECS`
//! - `RESEARCH_KIT_DATA_DIR`

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::{AppConfig, CONFIG_DIR};
use rk_protocol::config_models::GlobalConfig;
use std::collections::HashSet;
use std::path::Path;

pub const ENV_SERVICE_URL: &str = "RESEARCH_KIT_SERVICE_URL";
pub const ENV_TIMEOUT_SECS: &str = "RESEARCH_KIT_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "RESEARCH_KIT_DATA_DIR";

/// Loads configuration for the project at `root`.
///
/// # Returns
///
/// An `AppConfig`. If `.research-kit/` or `config.toml` is missing, the
/// defaults are used rather than returning an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - `config.toml` exists but cannot be read or parsed
/// - A value is out of range (zero timeout, duplicate stage ids, ...)
/// - An environment override is malformed
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    load_config_with_env(root, |var| std::env::var(var).ok())
}

/// Like [`load_config`], reading overrides through `env` instead of the
/// process environment.
pub fn load_config_with_env(
    root: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ConfigResult<AppConfig> {
    let config_path = root.join(CONFIG_DIR).join("config.toml");

    let mut global = if config_path.exists() {
        let content =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
                path: config_path.clone(),
                source,
            })?;

        toml::from_str::<GlobalConfig>(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?
    } else {
        GlobalConfig::default()
    };

    apply_env_overrides(&mut global, env)?;
    validate(&config_path, &global)?;

    tracing::debug!(
        service_url = %global.service_url,
        timeout_secs = global.request_timeout_secs,
        stages = global.stages.len(),
        "Loaded configuration"
    );

    Ok(AppConfig::resolve(root, global))
}

fn apply_env_overrides(
    global: &mut GlobalConfig,
    env: impl Fn(&str) -> Option<String>,
) -> ConfigResult<()> {
    if let Some(url) = env(ENV_SERVICE_URL) {
        global.service_url = url;
    }

    if let Some(raw) = env(ENV_TIMEOUT_SECS) {
        global.request_timeout_secs =
            raw.trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidEnv {
                    var: ENV_TIMEOUT_SECS.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
    }

    if let Some(dir) = env(ENV_DATA_DIR) {
        global.data_dir = Some(dir);
    }

    Ok(())
}

fn validate(path: &Path, global: &GlobalConfig) -> ConfigResult<()> {
    let invalid = |reason: String| ConfigError::InvalidConfig {
        path: path.to_path_buf(),
        reason,
    };

    if global.service_url.trim().is_empty() {
        return Err(invalid("service_url must not be empty".to_string()));
    }

    if global.request_timeout_secs == 0 {
        return Err(invalid("request_timeout_secs must be at least 1".to_string()));
    }

    let mut seen = HashSet::new();
    for stage in &global.stages {
        if stage.id.trim().is_empty() {
            return Err(invalid("stage id must not be empty".to_string()));
        }
        if !seen.insert(stage.id.as_str()) {
            return Err(invalid(format!("duplicate stage id {:?}", stage.id)));
        }
    }

    Ok(())
}
