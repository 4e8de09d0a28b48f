use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::prefetch::DEFAULT_LOOKBACK;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub tui: TuiConfig,
    pub data: DataConfig,
}

/// Search endpoint and paging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Scheme, host and port of the search server.
    pub base_url: String,
    /// Path of the result endpoint, resolved against `base_url`.
    pub results_path: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Distance from the end of the list at which the next page is requested.
    pub prefetch_lookback: usize,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
    /// Header title shown while no ingredient is entered.
    pub title: String,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            results_path: "/search-results".to_string(),
            request_timeout_secs: 10,
            prefetch_lookback: DEFAULT_LOOKBACK,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: true,
            title: "Cocktail search".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/cocktail-search/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &std::path::Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}, using defaults: {e}",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("cocktail-search"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir().join("logs")
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("cocktail-search").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
