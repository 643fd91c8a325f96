use std::path::Path;

use crate::{args::ListArgs, db::open_collections, formatters::Printer};

pub async fn activity_cmd(db_path: &Path, args: ListArgs) -> Result<(), anyhow::Error> {
    let store = open_collections(db_path).await?;

    Printer::new(args.output).print_activity(store.recent_activity())?;
    Ok(())
}

pub async fn recent_cmd(db_path: &Path, args: ListArgs) -> Result<(), anyhow::Error> {
    let store = open_collections(db_path).await?;

    Printer::new(args.output).print_recent_views(store.recent_card_views())?;
    Ok(())
}
