use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::account::Bech32Codec;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot render config: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ChainstConfig {
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
    #[serde(default = "default_bech32_prefix")]
    pub bech32_prefix: String,
    #[serde(default = "default_genesis_file")]
    pub genesis_file: String,
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_chain_id() -> String {
    "chainst-1".to_string()
}

fn default_bech32_prefix() -> String {
    "cosmos".to_string()
}

fn default_genesis_file() -> String {
    "genesis.json".to_string()
}

fn default_state_file() -> String {
    "./data/bank.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            bech32_prefix: default_bech32_prefix(),
            genesis_file: default_genesis_file(),
            state_file: default_state_file(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ChainstConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let s = toml::to_string_pretty(self)?;
        std::fs::write(path, s)?;
        Ok(())
    }

    /// Read the config at `path`, writing defaults there first if the file
    /// does not exist. A file that exists but cannot be read or parsed is an
    /// error.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let config = Self::load(path)?;
            debug!("Config loaded from {}", path.display());
            Ok(config)
        } else {
            info!("Config file not found at '{}'. Creating default.", path.display());
            let config = Self::default();
            if let Err(e) = config.save(path) {
                warn!("Could not write default config: {}", e);
            }
            Ok(config)
        }
    }

    pub fn address_codec(&self) -> Bech32Codec {
        Bech32Codec::new(self.chain.bech32_prefix.clone())
    }
}
