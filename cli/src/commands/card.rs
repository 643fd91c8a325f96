use std::path::Path;

use cardbase_core::CardCatalog;

use crate::{args::CardArgs, db::open_collections, formatters::Printer};

pub async fn card_cmd<C: CardCatalog>(
    catalog: C,
    db_path: &Path,
    args: CardArgs,
) -> Result<(), anyhow::Error> {
    let Some(card) = catalog.get_card_by_id(&args.id).await? else {
        anyhow::bail!("Card not found: {}", args.id);
    };

    let mut store = open_collections(db_path).await?;
    store.record_card_view(&card).await?;

    Printer::new(args.output).print_card(&card)?;
    Ok(())
}
