use std::path::Path;

use crate::{app_config::AppConfig, profile::Profile};

pub fn init_cmd(config: &AppConfig, profile_path: &Path) -> Result<(), anyhow::Error> {
    if config.profile_exists {
        println!("Profile already exists at {}", profile_path.display());
        return Ok(());
    }

    let profile = Profile {
        db_path: Some(config.db_path.clone()),
        catalog_url: Some(config.catalog_url.clone()),
    };
    profile.save(profile_path)?;

    println!("Profile written to {}", profile_path.display());
    Ok(())
}
