use std::path::Path;

use cardbase_core::{load_theme, save_theme};

use crate::{args::ThemeArgs, db::open_local_store};

pub async fn theme_cmd(db_path: &Path, args: ThemeArgs) -> Result<(), anyhow::Error> {
    let kv = open_local_store(db_path)?;

    if let Some(mode) = args.mode {
        save_theme(&kv, mode).await?;
    }

    println!("{}", load_theme(&kv).await);
    Ok(())
}
