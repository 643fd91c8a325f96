use anyhow::{Context, Result};
use cardbase_core::{CollectionStore, SqliteStore};
use std::path::Path;

/// Open or create the local key-value database at the given path
pub fn open_local_store(path: &Path) -> Result<SqliteStore> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {:?}", parent))?;
    }

    SqliteStore::open(path)
        .with_context(|| format!("Failed to open local database at {:?}", path))
}

/// Open the collection store backed by the local database
pub async fn open_collections(path: &Path) -> Result<CollectionStore<SqliteStore>> {
    let kv = open_local_store(path)?;
    Ok(CollectionStore::open(kv).await)
}
