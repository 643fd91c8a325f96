//! Collection & activity store.
//!
//! Sole owner of the user's collections, the recent activity log and the
//! recent card views. Every mutation updates memory first and then writes the
//! affected blob through to the [`KeyValueStore`] before returning.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{ActivityKind, Card, Collection, RecentActivity, RecentCardView};
use crate::storage::{
    KeyValueStore, COLLECTIONS_KEY, RECENT_ACTIVITY_KEY, RECENT_CARD_VIEWS_KEY,
};

pub const MAX_RECENT_ACTIVITY: usize = 10;
pub const MAX_RECENT_CARD_VIEWS: usize = 3;

pub struct CollectionStore<S> {
    kv: S,
    collections: Vec<Collection>,
    recent_activity: Vec<RecentActivity>,
    recent_card_views: Vec<RecentCardView>,
}

impl<S: KeyValueStore> CollectionStore<S> {
    /// Create the store and restore its state from `kv`
    pub async fn open(kv: S) -> Self {
        let mut store = Self {
            kv,
            collections: Vec::new(),
            recent_activity: Vec::new(),
            recent_card_views: Vec::new(),
        };
        store.load_all().await;
        store
    }

    /// Re-read all three blobs. Missing keys and corrupt data load as empty.
    pub async fn load_all(&mut self) {
        self.collections = self.load_key(COLLECTIONS_KEY).await;
        self.recent_activity = self.load_key(RECENT_ACTIVITY_KEY).await;
        self.recent_card_views = self.load_key(RECENT_CARD_VIEWS_KEY).await;
    }

    async fn load_key<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.kv.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read '{}', starting empty: {}", key, e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding corrupt '{}' data: {}", key, e);
            Vec::new()
        })
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    pub fn favorite_collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.iter().filter(|c| c.is_favorite)
    }

    /// Newest first, at most [`MAX_RECENT_ACTIVITY`] entries
    pub fn recent_activity(&self) -> &[RecentActivity] {
        &self.recent_activity
    }

    /// Newest first, at most [`MAX_RECENT_CARD_VIEWS`] entries
    pub fn recent_card_views(&self) -> &[RecentCardView] {
        &self.recent_card_views
    }

    /// Create an empty, non-favorite collection
    pub async fn create_collection(&mut self, name: &str) -> Result<Collection> {
        if name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "collection name must not be blank".to_string(),
            ));
        }

        let collection = Collection {
            id: ulid::Ulid::new().to_string(),
            name: name.to_string(),
            cards: Vec::new(),
            is_favorite: false,
        };
        self.collections.push(collection.clone());
        self.push_activity(ActivityKind::Add, &collection);

        self.persist_collections().await?;
        self.persist_activity().await?;

        Ok(collection)
    }

    /// Delete a collection. Unknown ids are a no-op and return `None`.
    pub async fn delete_collection(&mut self, id: &str) -> Result<Option<Collection>> {
        let Some(index) = self.collections.iter().position(|c| c.id == id) else {
            debug!("Delete of unknown collection {}", id);
            return Ok(None);
        };

        let removed = self.collections.remove(index);
        self.push_activity(ActivityKind::Remove, &removed);

        self.persist_collections().await?;
        self.persist_activity().await?;

        Ok(Some(removed))
    }

    /// Flip the favorite flag. Returns the new value, or `None` for unknown ids.
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<Option<bool>> {
        let Some(collection) = self.collections.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        collection.is_favorite = !collection.is_favorite;
        let is_favorite = collection.is_favorite;
        let snapshot = collection.clone();
        self.push_activity(ActivityKind::Favorite, &snapshot);

        self.persist_collections().await?;
        self.persist_activity().await?;

        Ok(Some(is_favorite))
    }

    /// Append a card. A card already present leaves the collection untouched.
    pub async fn add_card_to_collection(&mut self, collection_id: &str, card: Card) -> Result<()> {
        let collection = self
            .collections
            .iter_mut()
            .find(|c| c.id == collection_id)
            .ok_or_else(|| Error::NotFound(format!("Collection {}", collection_id)))?;

        if collection.contains(&card.id) {
            return Err(Error::DuplicateCard {
                collection_id: collection_id.to_string(),
                card_id: card.id,
            });
        }

        collection.cards.push(card);
        self.persist_collections().await
    }

    /// Remove a card. Returns whether anything was removed.
    pub async fn remove_card_from_collection(
        &mut self,
        collection_id: &str,
        card_id: &str,
    ) -> Result<bool> {
        let Some(collection) = self.collections.iter_mut().find(|c| c.id == collection_id) else {
            return Ok(false);
        };

        let before = collection.cards.len();
        collection.cards.retain(|c| c.id != card_id);
        if collection.cards.len() == before {
            return Ok(false);
        }

        self.persist_collections().await?;
        Ok(true)
    }

    /// Record that a collection was opened
    pub async fn record_view(&mut self, collection_id: &str) -> Result<()> {
        let Some(collection) = self.collection(collection_id).cloned() else {
            return Ok(());
        };

        self.push_activity(ActivityKind::View, &collection);
        self.persist_activity().await
    }

    /// Move `card` to the front of the recent card views
    pub async fn record_card_view(&mut self, card: &Card) -> Result<()> {
        let view = RecentCardView::from_card(card, now_millis());

        self.recent_card_views.retain(|v| v.id != view.id);
        self.recent_card_views.insert(0, view);
        self.recent_card_views.truncate(MAX_RECENT_CARD_VIEWS);

        self.persist(RECENT_CARD_VIEWS_KEY, &self.recent_card_views)
            .await
    }

    fn push_activity(&mut self, kind: ActivityKind, collection: &Collection) {
        self.recent_activity.insert(
            0,
            RecentActivity {
                kind,
                collection_id: collection.id.clone(),
                collection_name: collection.name.clone(),
                timestamp: now_millis(),
            },
        );
        self.recent_activity.truncate(MAX_RECENT_ACTIVITY);
    }

    async fn persist_collections(&self) -> Result<()> {
        self.persist(COLLECTIONS_KEY, &self.collections).await
    }

    async fn persist_activity(&self) -> Result<()> {
        self.persist(RECENT_ACTIVITY_KEY, &self.recent_activity)
            .await
    }

    async fn persist<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| Error::TransientIo(format!("failed to encode '{}': {}", key, e)))?;

        self.kv.set(key, &json).await.inspect_err(|e| {
            warn!("Failed to persist '{}', keeping in-memory state: {}", key, e);
        })
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
