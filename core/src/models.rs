use serde::{Deserialize, Serialize};

/// Image links attached to a catalog card
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageUris {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
}

/// A card as returned by the catalog. Never authored locally.
///
/// Field names follow the catalog's JSON so records can be stored and
/// restored without a separate projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    /// Catalog id (opaque, primary key)
    pub id: String,
    pub name: String,
    /// Single-letter color codes (W, U, B, R, G)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// Set code (e.g. "m21")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,
}

impl Card {
    /// Minimal card with only id and name, mostly useful in tests and fixtures
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Card {
            id: id.into(),
            name: name.into(),
            colors: None,
            set: None,
            type_line: None,
            image_uris: None,
            mana_cost: None,
            oracle_text: None,
        }
    }

    pub fn colors(&self) -> &[String] {
        self.colors.as_deref().unwrap_or(&[])
    }

    pub fn small_image(&self) -> Option<&str> {
        self.image_uris.as_ref().and_then(|i| i.small.as_deref())
    }

    pub fn is_land(&self) -> bool {
        self.type_line
            .as_deref()
            .map(|t| t.to_lowercase().contains("land"))
            .unwrap_or(false)
    }
}

/// A catalog set, used to populate the set filter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardSet {
    pub code: String,
    pub name: String,
}

/// A user-named, user-ordered group of cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// ULID assigned at creation, stable for the collection's lifetime
    pub id: String,
    pub name: String,
    /// Insertion order is display order; ids are unique within a collection
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Collection {
    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.iter().any(|c| c.id == card_id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    View,
    Favorite,
    Add,
    Remove,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActivityKind::View => "view",
            ActivityKind::Favorite => "favorite",
            ActivityKind::Add => "add",
            ActivityKind::Remove => "remove",
        };
        f.write_str(s)
    }
}

/// Collection-level user action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub collection_id: String,
    /// Name at the time of the event; never rewritten afterwards
    pub collection_name: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

/// A recently opened card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentCardView {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

impl RecentCardView {
    pub fn from_card(card: &Card, timestamp: i64) -> Self {
        RecentCardView {
            id: card.id.clone(),
            name: card.name.clone(),
            image_uri: card.small_image().map(str::to_string),
            timestamp,
        }
    }
}

/// One page of catalog search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub cards: Vec<Card>,
    pub has_more: bool,
}
