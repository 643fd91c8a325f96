use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub db_path: Option<String>,
    pub catalog_url: Option<String>,
}

impl Profile {
    pub fn from_path(profile: &Path) -> anyhow::Result<Option<Self>> {
        if !profile.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(profile).context("Failed to read profile file")?;

        let profile: Self = toml::from_str(&contents).context("Failed to deserialize profile")?;

        Ok(Some(profile))
    }

    pub fn save(&self, profile_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = profile_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create profile directory")?;
        }

        let content = toml::to_string(self).context("Failed to serialize profile")?;

        std::fs::write(profile_path, content).context("Failed to write profile")?;

        Ok(())
    }
}

/// Get the XDG config directory, respecting XDG_CONFIG_HOME
fn get_config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("cardbase")
    } else {
        directories::ProjectDirs::from("com", "cardbase", "cardbase")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Get the XDG data directory, respecting XDG_DATA_HOME
fn get_data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("cardbase")
    } else {
        directories::ProjectDirs::from("com", "cardbase", "cardbase")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Get path to a profile's config file
pub fn get_profile_config_path(profile_name: &str) -> PathBuf {
    get_config_dir()
        .join("profiles")
        .join(format!("{}.toml", profile_name))
}

/// Get path to a profile's database
pub fn get_profile_db_path(profile_name: &str) -> PathBuf {
    get_data_dir()
        .join("profiles")
        .join(profile_name)
        .join("cardbase.db")
}

pub fn profile_name(arg_profile: &Option<String>) -> &str {
    arg_profile.as_deref().unwrap_or(DEFAULT_PROFILE)
}
