use thiserror::Error;
use uuid::Uuid;

/// Failure of an exchange with the generation endpoints.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint answered with an error body; carries its `message`.
    #[error("{0}")]
    Endpoint(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure of a store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("business name and location are required")]
    Validation,

    #[error("no active business selected")]
    NoActiveSelection,

    #[error("unknown business id: {0}")]
    UnknownId(Uuid),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failure writing the persisted collection.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encode: {0}")]
    Encode(#[from] serde_json::Error),
}
