//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_time_window() -> String {
    "24h".to_string()
}

const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path to the service catalog JSON file.
    #[serde(default)]
    pub catalog_path: String,

    /// Default investigation lookback when no `--window` is given
    /// (relative spec: `"30m"`, `"24h"`, `"7d"`).
    #[serde(default = "default_time_window")]
    pub default_time_window: String,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl GeneralConfig {
    /// Whether a catalog path has been configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.catalog_path.is_empty()
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            catalog_path: String::new(),
            default_time_window: default_time_window(),
            default_limit: default_limit(),
        }
    }
}
