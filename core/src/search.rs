//! Incremental catalog search.
//!
//! [`SearchSession`] is the state machine: it hands out [`PageRequest`]s and
//! folds responses back in, discarding any that belong to an older filter
//! tuple or page. [`SearchController`] wires a session to a [`CardCatalog`].

use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::CardCatalog;
use crate::error::{Error, Result};
use crate::models::{Card, SearchPage};

/// Color filter vocabulary. Only one value is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFilter {
    White,
    Blue,
    Black,
    Red,
    Green,
    Multicolor,
    Colorless,
    Land,
}

impl ColorFilter {
    pub const ALL: [ColorFilter; 8] = [
        ColorFilter::White,
        ColorFilter::Blue,
        ColorFilter::Black,
        ColorFilter::Red,
        ColorFilter::Green,
        ColorFilter::Multicolor,
        ColorFilter::Colorless,
        ColorFilter::Land,
    ];

    /// Short code used on the command line and in the query vocabulary
    pub fn code(&self) -> &'static str {
        match self {
            ColorFilter::White => "w",
            ColorFilter::Blue => "u",
            ColorFilter::Black => "b",
            ColorFilter::Red => "r",
            ColorFilter::Green => "g",
            ColorFilter::Multicolor => "multicolor",
            ColorFilter::Colorless => "colorless",
            ColorFilter::Land => "land",
        }
    }

    /// Filter values whose code contains `term`, ignoring case
    pub fn matching(term: &str) -> Vec<ColorFilter> {
        let term = term.to_lowercase();
        Self::ALL
            .into_iter()
            .filter(|c| c.code().contains(&term))
            .collect()
    }

    fn query_term(&self) -> &'static str {
        match self {
            ColorFilter::White => "c:w",
            ColorFilter::Blue => "c:u",
            ColorFilter::Black => "c:b",
            ColorFilter::Red => "c:r",
            ColorFilter::Green => "c:g",
            ColorFilter::Multicolor => "c:m",
            ColorFilter::Colorless => "c:c -t:land",
            ColorFilter::Land => "t:land",
        }
    }

    /// Local check against the card's own data. This is the authoritative
    /// filter; the query term only narrows what the catalog sends back.
    pub fn matches(&self, card: &Card) -> bool {
        let colors = card.colors();
        let has = |code: &str| colors.iter().any(|c| c.eq_ignore_ascii_case(code));

        match self {
            ColorFilter::White => has("w"),
            ColorFilter::Blue => has("u"),
            ColorFilter::Black => has("b"),
            ColorFilter::Red => has("r"),
            ColorFilter::Green => has("g"),
            ColorFilter::Multicolor => colors.len() > 1,
            ColorFilter::Colorless => colors.is_empty() && !card.is_land(),
            ColorFilter::Land => card.is_land(),
        }
    }
}

impl std::fmt::Display for ColorFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ColorFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown color filter '{}'", s)))
    }
}

/// The (query, color, set) tuple defining one search session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub query: String,
    pub color: Option<ColorFilter>,
    pub set: Option<String>,
}

impl SearchFilters {
    pub fn text(query: impl Into<String>) -> Self {
        SearchFilters {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Catalog query expression; all parts are ANDed
    pub fn to_query(&self) -> String {
        let mut terms: Vec<String> = Vec::new();

        let text = self.query.trim();
        if !text.is_empty() {
            terms.push(text.to_string());
        }

        if let Some(set) = self.set.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            terms.push(format!("set:{}", set));
        }

        if let Some(color) = self.color {
            terms.push(color.query_term().to_string());
        }

        terms.join(" ")
    }
}

/// Observable session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading { page: u32 },
    Ready,
    /// No more pages for the current filter tuple
    Exhausted,
}

/// A page fetch handed out by the session, tagged for the staleness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: String,
    pub page: u32,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Nothing was fetched (already loading or exhausted)
    Skipped,
    /// Page merged; `added` cards were new and passed the color filter
    Applied { added: usize },
    /// Request failed; session is now exhausted
    Failed,
    /// Response belonged to an older filter tuple or page and was dropped
    Stale,
}

#[derive(Debug)]
pub struct SearchSession {
    filters: SearchFilters,
    page: u32,
    has_more: bool,
    loading: bool,
    generation: u64,
    result_cards: Vec<Card>,
}

impl Default for SearchSession {
    fn default() -> Self {
        SearchSession {
            filters: SearchFilters::default(),
            page: 0,
            has_more: true,
            loading: false,
            generation: 0,
            result_cards: Vec::new(),
        }
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Last requested page, 0 before the first fetch
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result_cards(&self) -> &[Card] {
        &self.result_cards
    }

    pub fn state(&self) -> SessionState {
        if self.loading {
            SessionState::Loading { page: self.page }
        } else if self.page == 0 {
            SessionState::Idle
        } else if self.has_more {
            SessionState::Ready
        } else {
            SessionState::Exhausted
        }
    }

    /// Replace the filter tuple and start over at page 1.
    ///
    /// Any request still in flight becomes stale.
    pub fn begin_filters(&mut self, filters: SearchFilters) -> PageRequest {
        self.filters = filters;
        self.page = 1;
        self.has_more = true;
        self.result_cards.clear();
        self.generation += 1;
        self.loading = true;

        self.request()
    }

    /// Next page request, or `None` while loading or once exhausted
    pub fn begin_next_page(&mut self) -> Option<PageRequest> {
        if self.loading || !self.has_more {
            return None;
        }

        self.page += 1;
        self.loading = true;
        Some(self.request())
    }

    fn request(&self) -> PageRequest {
        let request = PageRequest {
            query: self.filters.to_query(),
            page: self.page,
            generation: self.generation,
        };
        debug!("Requesting page {} for '{}'", request.page, request.query);
        request
    }

    /// Fold a response for `request` into the session
    pub fn apply(&mut self, request: &PageRequest, response: Result<SearchPage>) -> PageOutcome {
        if request.generation != self.generation || request.page != self.page {
            debug!(
                "Discarding stale page {} for '{}'",
                request.page, request.query
            );
            return PageOutcome::Stale;
        }

        self.loading = false;

        match response {
            Ok(page) => {
                self.has_more = page.has_more;
                let added = self.merge(page.cards);
                PageOutcome::Applied { added }
            }
            Err(e) => {
                warn!("Search page {} failed: {}", request.page, e);
                self.has_more = false;
                if request.page == 1 {
                    self.result_cards.clear();
                }
                PageOutcome::Failed
            }
        }
    }

    fn merge(&mut self, mut cards: Vec<Card>) -> usize {
        cards.sort_by(|a, b| compare_names(&a.name, &b.name));

        let mut seen: HashSet<String> = self.result_cards.iter().map(|c| c.id.clone()).collect();
        let before = self.result_cards.len();

        for card in cards {
            if let Some(color) = self.filters.color {
                if !color.matches(&card) {
                    continue;
                }
            }
            if seen.insert(card.id.clone()) {
                self.result_cards.push(card);
            }
        }

        self.result_cards.len() - before
    }
}

/// Approximates a locale-aware name order: case-insensitive, with lowercase
/// ahead of uppercase when names differ only in case. Accented letters are
/// compared by code point, so they sort after `z` rather than beside their
/// base letter.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Drives a [`SearchSession`] against a catalog
pub struct SearchController<C> {
    catalog: C,
    session: SearchSession,
}

impl<C: CardCatalog> SearchController<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            session: SearchSession::new(),
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Replace the filters and fetch page 1
    pub async fn set_filters(&mut self, filters: SearchFilters) -> PageOutcome {
        let request = self.session.begin_filters(filters);
        self.run(request).await
    }

    /// Fetch the page after the last one, if any
    pub async fn fetch_next_page(&mut self) -> PageOutcome {
        match self.session.begin_next_page() {
            Some(request) => self.run(request).await,
            None => PageOutcome::Skipped,
        }
    }

    async fn run(&mut self, request: PageRequest) -> PageOutcome {
        let response = self
            .catalog
            .search_cards(&request.query, request.page)
            .await;
        self.session.apply(&request, response)
    }
}
