#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod catalog;
pub mod db;
pub mod error;
pub mod models;
pub mod preferences;
pub mod schema;
pub mod search;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use catalog::{filter_sets, parse_search_page, parse_set_list, CardCatalog};
pub use error::{Error, Result};
pub use models::{
    ActivityKind, Card, CardSet, Collection, ImageUris, RecentActivity, RecentCardView,
    SearchPage,
};
pub use preferences::{load_theme, save_theme, ThemeMode};
pub use search::{
    ColorFilter, PageOutcome, PageRequest, SearchController, SearchFilters, SearchSession,
    SessionState,
};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use store::{CollectionStore, MAX_RECENT_ACTIVITY, MAX_RECENT_CARD_VIEWS};
