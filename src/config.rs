//! Server configuration from the environment.
//!
//! `HOST` (default 0.0.0.0), `PORT` (default 8080), `BRACKET_SIZE` (default 8) and an
//! optional `ID_SEED` that makes generated ids reproducible.

use crate::logic::{BracketConfig, DEFAULT_BRACKET_SIZE};
use crate::models::EngineError;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub bracket: BracketConfig,
    pub id_seed: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bracket: BracketConfig::default(),
            id_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable numbers fall back to defaults; a bracket
    /// size that is not a power of two, or above 64, is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let size = lookup("BRACKET_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_BRACKET_SIZE);
        let id_seed = lookup("ID_SEED").and_then(|s| s.parse().ok());
        Ok(Self {
            host,
            port,
            bracket: BracketConfig::new(size)?,
            id_seed,
        })
    }
}
