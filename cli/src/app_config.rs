use std::path::Path;

use serde::Serialize;

use crate::profile::{get_profile_db_path, Profile};

pub const DEFAULT_CATALOG_URL: &str = "https://api.scryfall.com";

#[derive(Debug, Serialize)]
pub struct AppConfig {
    pub profile_name: String,
    pub profile_path: String,
    pub db_path: String,
    pub catalog_url: String,
    pub profile_exists: bool,
}

impl AppConfig {
    pub fn from_profile(profile_name: &str, profile_path: &Path, profile: Option<&Profile>) -> Self {
        let db_path = profile
            .and_then(|p| p.db_path.as_ref())
            .cloned()
            .unwrap_or_else(|| get_profile_db_path(profile_name).to_string_lossy().into_owned());

        let catalog_url = profile
            .and_then(|p| p.catalog_url.as_ref())
            .cloned()
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

        AppConfig {
            profile_name: profile_name.to_string(),
            profile_path: profile_path.to_string_lossy().into_owned(),
            db_path,
            catalog_url,
            profile_exists: profile.is_some(),
        }
    }
}
