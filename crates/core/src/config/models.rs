//! Configuration models that aggregate all settings.
//!
//! This module provides the unified `AppConfig` structure that combines
//! the parsed global settings with paths resolved against the project root.

use rk_protocol::config_models::GlobalConfig;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration directory.
pub const CONFIG_DIR: &str = ".research-kit";

/// Unified application configuration.
///
/// # Example
///
/// ```rust,no_run
/// use rk_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Research service at {}", config.global.service_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Settings from `config.toml` with environment overrides applied.
    pub global: GlobalConfig,

    /// Directory holding persisted records (bookmarks).
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Defaults for a project rooted at `root`.
    pub fn defaults_for(root: &Path) -> Self {
        Self::resolve(root, GlobalConfig::default())
    }

    /// Resolve `global.data_dir` against `root`.
    pub fn resolve(root: &Path, global: GlobalConfig) -> Self {
        let data_dir = match global.data_dir.as_deref() {
            Some(dir) => root.join(dir),
            None => root.join(CONFIG_DIR).join("data"),
        };
        Self { global, data_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_dir() {
        let config = AppConfig::defaults_for(Path::new("/project"));
        assert_eq!(config.data_dir, PathBuf::from("/project/.research-kit/data"));
    }

    #[test]
    fn test_relative_and_absolute_data_dir() {
        let relative = AppConfig::resolve(
            Path::new("/project"),
            GlobalConfig {
                data_dir: Some("store".to_string()),
                ..GlobalConfig::default()
            },
        );
        assert_eq!(relative.data_dir, PathBuf::from("/project/store"));

        let absolute = AppConfig::resolve(
            Path::new("/project"),
            GlobalConfig {
                data_dir: Some("/var/lib/rk".to_string()),
                ..GlobalConfig::default()
            },
        );
        assert_eq!(absolute.data_dir, PathBuf::from("/var/lib/rk"));
    }
}
