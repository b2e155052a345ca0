//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Environment variable the host itself uses for its state directory.
const OPENCLAW_DIR_ENV: &str = "OPENCLAW_DIR";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the OpenClaw state tree.
    pub root: PathBuf,
    /// Seconds between refreshes in `watch`.
    pub interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            interval: 5,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment
            .merge(Env::raw().only(&[OPENCLAW_DIR_ENV]).map(|_| "root".into()))
            .merge(Env::prefixed("ANTENNA_"));

        figment.extract()
    }
}

/// `~/.openclaw`, or a relative `.openclaw` if there is no home directory.
fn default_root() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".openclaw"), |home| home.join(".openclaw"))
}

/// Returns the platform-specific config directory for antenna.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("antenna"))
}
