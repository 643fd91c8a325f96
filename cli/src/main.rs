#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![warn(clippy::expect_used)]

use std::path::Path;

use crate::app_config::AppConfig;
use args::{CliArgs, Command};
use clap::Parser;
use commands::{
    activity::{activity_cmd, recent_cmd},
    card::card_cmd,
    collection::collection_cmd,
    config::config_cmd,
    init::init_cmd,
    search::{search_cmd, sets_cmd},
    theme::theme_cmd,
};
use profile::{get_profile_config_path, profile_name, Profile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web_client::ScryfallClient;

mod app_config;
mod args;
mod commands;
mod db;
mod formatters;
mod profile;
mod web_client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let args = CliArgs::parse();

    let profile_name = profile_name(&args.config.profile);
    let profile_path = get_profile_config_path(profile_name);

    if let Some(command) = args.command {
        let profile = Profile::from_path(&profile_path)?;
        let config = AppConfig::from_profile(profile_name, &profile_path, profile.as_ref());
        let db_path = Path::new(&config.db_path);
        let catalog = || ScryfallClient::new(&config.catalog_url);

        match command {
            Command::Config => config_cmd(&config)?,
            Command::Init => init_cmd(&config, &profile_path)?,
            Command::Search(args) => search_cmd(catalog()?, args).await?,
            Command::Sets(args) => sets_cmd(catalog()?, args).await?,
            Command::Card(args) => card_cmd(catalog()?, db_path, args).await?,
            Command::Collection(subcommand) => {
                collection_cmd(db_path, subcommand, catalog).await?
            }
            Command::Activity(args) => activity_cmd(db_path, args).await?,
            Command::Recent(args) => recent_cmd(db_path, args).await?,
            Command::Theme(args) => theme_cmd(db_path, args).await?,
        }
    }

    Ok(())
}

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{crate_name}=warn,cardbase_core=warn",
                    crate_name = env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
