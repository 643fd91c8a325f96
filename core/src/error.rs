use thiserror::Error;

/// Errors surfaced by the collection store, the search controller and the
/// adapters they drive.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// User supplied data failed a precondition (e.g. blank collection name)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Card {card_id} is already in collection {collection_id}")]
    DuplicateCard {
        collection_id: String,
        card_id: String,
    },

    #[error("{0} not found")]
    NotFound(String),

    /// Persistence or catalog transport failure
    #[error("I/O failure: {0}")]
    TransientIo(String),

    /// Catalog answered with something that is not a result list
    #[error("Malformed catalog response: {0}")]
    MalformedResponse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::TransientIo(format!("sqlite: {}", e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedResponse(e.to_string())
    }
}
