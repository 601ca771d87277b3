use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment keys
// ─────────────────────────────────────────────────────────────────────────────

pub const CONFIG_FILE_ENV: &str = "CARDIO_CONFIG";
pub const HOST_ENV: &str = "CARDIO_HOST";
pub const PORT_ENVS: [&str; 2] = ["PORT", "CARDIO_PORT"];
pub const MODEL_PATH_ENV: &str = "CARDIO_MODEL_PATH";
pub const CORS_ORIGINS_ENV: &str = "CARDIO_CORS_ORIGINS";

// ─────────────────────────────────────────────────────────────────────────────
// Server Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 10000,
            model_path: PathBuf::from("models/heart_disease_model.json"),
            cors_origins: vec!["*".into()],
        }
    }
}

impl ServerConfig {
    /// Optional JSON file named by `CARDIO_CONFIG`, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        base.apply_env(|key| env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get(HOST_ENV) {
            self.host = host;
        }

        if let Some((key, raw)) = PORT_ENVS.iter().find_map(|k| get(*k).map(|v| (*k, v))) {
            self.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key, value: raw.clone() })?;
        }

        if let Some(path) = get(MODEL_PATH_ENV) {
            self.model_path = PathBuf::from(path);
        }

        if let Some(origins) = get(CORS_ORIGINS_ENV) {
            self.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(self)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}
