use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::storage::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the system appearance
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Auto => "auto",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ThemeMode::Auto),
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(Error::InvalidInput(format!("unknown theme '{}'", other))),
        }
    }
}

/// Read the stored theme. Missing or unreadable values fall back to `auto`.
pub async fn load_theme(kv: &dyn KeyValueStore) -> ThemeMode {
    match kv.get(THEME_KEY).await {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            warn!("Ignoring stored theme: {}", e);
            ThemeMode::Auto
        }),
        Ok(None) => ThemeMode::Auto,
        Err(e) => {
            warn!("Failed to read theme: {}", e);
            ThemeMode::Auto
        }
    }
}

/// Theme is stored as the bare mode string, not JSON
pub async fn save_theme(kv: &dyn KeyValueStore, mode: ThemeMode) -> Result<()> {
    kv.set(THEME_KEY, mode.as_str()).await
}
