use thiserror::Error;

/// Failure talking to the SQLite file. Displays the database message as-is.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{0}")]
    Connection(#[source] rusqlite::Error),

    #[error("{0}")]
    Statement(#[source] rusqlite::Error),
}

/// Form input rejected before any storage call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a required field is empty")]
    MissingFields,

    #[error("quantity or price is not a number")]
    NotNumeric,
}
