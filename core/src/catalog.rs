//! Remote card catalog contract and response parsing.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{Card, CardSet, SearchPage};

/// Paginated access to the remote card database
#[async_trait]
pub trait CardCatalog: Send + Sync {
    /// Run a catalog query expression for a 1-based page.
    ///
    /// Anything other than a well-formed result list is reported as
    /// [`Error::MalformedResponse`]; transport failures as [`Error::TransientIo`].
    async fn search_cards(&self, query: &str, page: u32) -> Result<SearchPage>;

    /// Single card lookup, `None` when the catalog does not know the id
    async fn get_card_by_id(&self, id: &str) -> Result<Option<Card>>;

    async fn list_sets(&self) -> Result<Vec<CardSet>>;
}

/// Parse a search response body.
///
/// Only `{"object": "list", "data": [...], "has_more": bool}` is accepted.
pub fn parse_search_page(body: &Value) -> Result<SearchPage> {
    let object = body.get("object").and_then(Value::as_str);
    if object != Some("list") {
        let detail = body
            .get("details")
            .and_then(Value::as_str)
            .unwrap_or("unexpected response object");
        return Err(Error::MalformedResponse(detail.to_string()));
    }

    let data = body
        .get("data")
        .ok_or_else(|| Error::MalformedResponse("missing 'data'".to_string()))?;
    let cards: Vec<Card> = serde_json::from_value(data.clone())?;

    let has_more = body
        .get("has_more")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(SearchPage { cards, has_more })
}

/// Parse a set list response, keeping only sets with both a code and a name
pub fn parse_set_list(body: &Value) -> Result<Vec<CardSet>> {
    let data = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::MalformedResponse("missing 'data'".to_string()))?;

    let sets = data
        .iter()
        .filter_map(|set| {
            let code = set.get("code").and_then(Value::as_str)?;
            let name = set.get("name").and_then(Value::as_str)?;
            if code.is_empty() || name.is_empty() {
                return None;
            }
            Some(CardSet {
                code: code.to_string(),
                name: name.to_string(),
            })
        })
        .collect();

    Ok(sets)
}

/// Sets whose name contains `term`, ignoring case
pub fn filter_sets<'a>(sets: &'a [CardSet], term: &str) -> Vec<&'a CardSet> {
    let term = term.to_lowercase();
    sets.iter()
        .filter(|set| set.name.to_lowercase().contains(&term))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_search_page() {
        let body = json!({
            "object": "list",
            "total_cards": 2,
            "has_more": true,
            "data": [
                {"object": "card", "id": "a", "name": "Opt", "colors": ["U"]},
                {"object": "card", "id": "b", "name": "Shock", "colors": ["R"]}
            ]
        });

        let page = parse_search_page(&body).unwrap();

        assert!(page.has_more);
        assert_eq!(page.cards.len(), 2);
        assert_eq!(page.cards[1].name, "Shock");
    }

    #[test]
    fn test_error_object_is_malformed() {
        let body = json!({
            "object": "error",
            "code": "not_found",
            "status": 404,
            "details": "Your query didn't match any cards."
        });

        let err = parse_search_page(&body).unwrap_err();

        assert_eq!(
            err,
            Error::MalformedResponse("Your query didn't match any cards.".to_string())
        );
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let missing_data = json!({"object": "list", "has_more": false});
        let bad_cards = json!({"object": "list", "data": [{"id": 1}]});

        assert!(matches!(
            parse_search_page(&missing_data),
            Err(Error::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_search_page(&bad_cards),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_set_list_skips_incomplete_sets() {
        let body = json!({
            "object": "list",
            "data": [
                {"code": "m21", "name": "Core Set 2021"},
                {"code": "", "name": "Nameless"},
                {"name": "No Code"},
                {"code": "dom", "name": "Dominaria"}
            ]
        });

        let sets = parse_set_list(&body).unwrap();

        let codes: Vec<_> = sets.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, ["m21", "dom"]);
    }

    #[test]
    fn test_filter_sets_by_name() {
        let sets = vec![
            CardSet {
                code: "m21".to_string(),
                name: "Core Set 2021".to_string(),
            },
            CardSet {
                code: "dom".to_string(),
                name: "Dominaria".to_string(),
            },
        ];

        let found = filter_sets(&sets, "core");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "m21");

        assert_eq!(filter_sets(&sets, "").len(), 2);
    }
}
