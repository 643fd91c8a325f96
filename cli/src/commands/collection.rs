use std::path::Path;

use anyhow::Context;
use cardbase_core::CardCatalog;

use crate::{args::CollectionCommand, db::open_collections, formatters::Printer};

pub async fn collection_cmd<C, F>(
    db_path: &Path,
    subcommand: CollectionCommand,
    catalog: F,
) -> Result<(), anyhow::Error>
where
    C: CardCatalog,
    F: FnOnce() -> anyhow::Result<C>,
{
    let mut store = open_collections(db_path).await?;

    match subcommand {
        CollectionCommand::Create { name } => {
            let collection = store.create_collection(&name.join(" ")).await?;
            println!("Created collection {} ({})", collection.name, collection.id);
        }
        CollectionCommand::List { favorites, output } => {
            let mut printer = Printer::new(output);
            if favorites {
                printer.print_collections(store.favorite_collections())?;
            } else {
                printer.print_collections(store.collections())?;
            }
        }
        CollectionCommand::Show { id, output } => {
            let collection = store
                .collection(&id)
                .cloned()
                .with_context(|| format!("No collection with id {}", id))?;
            store.record_view(&id).await?;

            Printer::new(output).print_collection(&collection)?;
        }
        CollectionCommand::Delete { id } => match store.delete_collection(&id).await? {
            Some(removed) => println!("Deleted collection {}", removed.name),
            None => println!("No collection with id {}", id),
        },
        CollectionCommand::Favorite { id } => match store.toggle_favorite(&id).await? {
            Some(true) => println!("Added {} to favorites", id),
            Some(false) => println!("Removed {} from favorites", id),
            None => println!("No collection with id {}", id),
        },
        CollectionCommand::Add {
            collection_id,
            card_id,
        } => {
            if store.collection(&collection_id).is_none() {
                anyhow::bail!("No collection with id {}", collection_id);
            }

            let card = catalog()?
                .get_card_by_id(&card_id)
                .await?
                .with_context(|| format!("Card not found: {}", card_id))?;
            let name = card.name.clone();

            store.add_card_to_collection(&collection_id, card).await?;
            println!("Added {} to collection", name);
        }
        CollectionCommand::Remove {
            collection_id,
            card_id,
        } => {
            if store
                .remove_card_from_collection(&collection_id, &card_id)
                .await?
            {
                println!("Removed card {}", card_id);
            } else {
                println!("Card {} is not in collection {}", card_id, collection_id);
            }
        }
    }

    Ok(())
}
