//! Persistent key-value adapters.
//!
//! The store only ever writes whole JSON blobs under a handful of fixed keys,
//! so the adapter surface is a plain async get/set.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::Connection;

use crate::db;
use crate::error::{Error, Result};

pub const COLLECTIONS_KEY: &str = "collections";
pub const RECENT_ACTIVITY_KEY: &str = "recentActivity";
pub const RECENT_CARD_VIEWS_KEY: &str = "recentCardViews";
pub const THEME_KEY: &str = "theme";

/// Durability substrate for locally created data.
///
/// Best effort only: a failed `set` is reported as [`Error::TransientIo`]
/// and callers keep their in-memory state.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// SQLite backed store, one row per key
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open_db(path)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Stored keys with their last write timestamp
    pub fn keys(&self) -> Result<Vec<(String, i64)>> {
        Ok(db::list_keys(&*self.lock()?)?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::TransientIo("database connection lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(db::get_value(&*self.lock()?, key)?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        Ok(db::set_value(&*self.lock()?, key, value)?)
    }
}

/// In-memory store for embedding and tests
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the given values
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self {
            values: Mutex::new(values),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| Error::TransientIo("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_sqlite_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(&dir.path().join("cards.db")).unwrap();

        store.set(THEME_KEY, "light").await.unwrap();

        assert_eq!(store.get(THEME_KEY).await.unwrap(), Some("light".to_string()));
        assert_eq!(store.get(COLLECTIONS_KEY).await.unwrap(), None);
        assert_eq!(store.keys().unwrap()[0].0, THEME_KEY);
    }

    #[tokio::test]
    async fn test_memory_store_seeded_values() {
        let store = MemoryStore::with_values([(THEME_KEY, "dark")]);

        assert_eq!(store.get(THEME_KEY).await.unwrap(), Some("dark".to_string()));

        store.set(THEME_KEY, "auto").await.unwrap();
        assert_eq!(store.get(THEME_KEY).await.unwrap(), Some("auto".to_string()));
    }
}
