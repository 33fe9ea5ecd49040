use std::{
    fs,
    path::{Path, PathBuf},
};

use coffee_ledger::Amount;
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_STATE_FILE: &str = "coffee-shop.state.json";
pub const DEFAULT_PRICE: Amount = 1_000_000_000_000_000;

/// Contents of `coffee-shop.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Ledger state file, relative to the config file.
    pub state: PathBuf,
    /// Price used by `deploy` when `--price` is not given.
    pub default_price: Amount,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state: PathBuf::from(DEFAULT_STATE_FILE),
            default_price: DEFAULT_PRICE,
        }
    }
}

/// Loads the config at `path`, falling back to defaults if it does not exist.
///
/// A relative `state` path is resolved against the config file's directory.
pub fn load(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;

    if config.state.is_relative() {
        if let Some(dir) = path.parent() {
            config.state = dir.join(&config.state);
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load(Path::new("/nonexistent/coffee-shop.toml")).expect("defaults");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("default_price = 42").expect("valid config");

        assert_eq!(config.default_price, 42);
        assert_eq!(config.state, PathBuf::from(DEFAULT_STATE_FILE));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("prise = 1").is_err());
    }
}
