//! Directory structure and file generation for `.research-kit` initialization.

use super::error::{InitError, InitResult};
use super::templates::CONFIG_TEMPLATE;
use crate::config::models::CONFIG_DIR;
use std::fs;
use std::path::PathBuf;

/// Options for initializing a `.research-kit` directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Project root where `.research-kit` will be created.
    pub target_dir: PathBuf,

    /// Overwrite an existing `config.toml`.
    pub force: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
        }
    }
}

/// Generate the `.research-kit` directory structure.
///
/// ```text
/// .research-kit/
/// ├── config.toml
/// └── data/
/// ```
///
/// Existing data is never touched; only `config.toml` is (re)written.
///
/// # Returns
///
/// The path of the written `config.toml`, or an `InitError` if:
/// - `config.toml` already exists (without force flag)
/// - File system operations fail
pub async fn generate_research_kit_structure(options: InitOptions) -> InitResult<PathBuf> {
    let rk_dir = options.target_dir.join(CONFIG_DIR);
    let config_path = rk_dir.join("config.toml");

    if config_path.exists() && !options.force {
        return Err(InitError::AlreadyInitialized(config_path));
    }

    let data_dir = rk_dir.join("data");
    fs::create_dir_all(&data_dir).map_err(|source| InitError::DirectoryCreate {
        path: data_dir.clone(),
        source,
    })?;

    fs::write(&config_path, CONFIG_TEMPLATE).map_err(|source| InitError::FileWrite {
        path: config_path.clone(),
        source,
    })?;

    tracing::info!(path = %config_path.display(), "Initialized research-kit project");
    Ok(config_path)
}
