//! Command-line configuration.

use gridboard_core::{ConfigError, FileStorage, GridConfig, StorageError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// User id used when none is given.
pub const DEFAULT_USER: &str = "local";

/// Environment variable naming the user.
pub const USER_ENV: &str = "GRIDBOARD_USER";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where layouts live and whose layout is edited.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub user_id: String,
    pub storage_dir: PathBuf,
    pub grid: GridConfig,
}

impl AppConfig {
    /// Combine command-line values with the environment and defaults.
    pub fn resolve(
        user: Option<String>,
        dir: Option<PathBuf>,
        grid_config: Option<&Path>,
    ) -> Result<Self, AppError> {
        let user_id = user
            .or_else(|| std::env::var(USER_ENV).ok())
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER.to_string());

        let storage_dir = match dir {
            Some(dir) => dir,
            None => FileStorage::default_path()?,
        };

        let grid = match grid_config {
            Some(path) => GridConfig::load(path)?,
            None => GridConfig::default(),
        };

        Ok(Self {
            user_id,
            storage_dir,
            grid,
        })
    }
}
