use std::path::Path;

use serde::Serialize;

use crate::{app_config::AppConfig, db::open_local_store};

#[derive(Serialize)]
struct ConfigReport<'a> {
    #[serde(flatten)]
    config: &'a AppConfig,
    stored_keys: Vec<String>,
}

pub fn config_cmd(config: &AppConfig) -> Result<(), anyhow::Error> {
    let db_path = Path::new(&config.db_path);

    let stored_keys = if db_path.exists() {
        open_local_store(db_path)?
            .keys()?
            .into_iter()
            .map(|(key, _)| key)
            .collect()
    } else {
        vec![]
    };

    let report = ConfigReport {
        config,
        stored_keys,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
