// ============================================================
// CONFIGURATION
// ============================================================
// Layered config: built-in defaults, socialsift.toml, SOCIALSIFT_* env

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP bind address
    pub host: String,
    /// HTTP bind port
    pub port: u16,
    /// Directory for persisted state such as the custom keyword map
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8745,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl AppConfig {
    /// Load configuration, later layers overriding earlier ones
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("socialsift.toml"))
            .merge(Env::prefixed("SOCIALSIFT_"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Invalid configuration: {e}")))
    }
}
