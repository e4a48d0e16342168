use serde::Deserialize;
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub player_data_path: PathBuf,
    pub model_path: PathBuf,
    /// Schema sidecar; derived from `model_path` when unset.
    pub meta_path: Option<PathBuf>,
    pub bind_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_data_path: PathBuf::from("player_data.csv"),
            model_path: PathBuf::from("rf_injury_change_model.pt"),
            meta_path: None,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config JSON {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid {var}: {value}")]
    Env { var: &'static str, value: String },
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the JSON file named by `CONFIG_PATH`, then individual
    /// environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = match lookup("CONFIG_PATH") {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(p) = lookup("PLAYER_DATA_PATH") {
            cfg.player_data_path = PathBuf::from(p);
        }
        if let Some(p) = lookup("MODEL_PATH") {
            cfg.model_path = PathBuf::from(p);
        }
        if let Some(p) = lookup("META_PATH") {
            cfg.meta_path = Some(PathBuf::from(p));
        }
        if let Some(port) = lookup("PORT") {
            let port: u16 = port.parse().map_err(|_| ConfigError::Env {
                var: "PORT",
                value: port.clone(),
            })?;
            cfg.bind_addr.set_port(port);
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            cfg.bind_addr = addr.parse().map_err(|_| ConfigError::Env {
                var: "BIND_ADDR",
                value: addr.clone(),
            })?;
        }
        Ok(cfg)
    }

    pub fn meta_path(&self) -> PathBuf {
        self.meta_path
            .clone()
            .unwrap_or_else(|| self.model_path.with_extension("meta.json"))
    }
}
