//! Error taxonomy for the matching engine.
//!
//! The engine performs no local recovery: every collaborator failure and every
//! validation error propagates unchanged to the caller, which translates it
//! into a transport-level response. No partial feeds are ever returned.

use thiserror::Error;

/// All failures the engine and its bundled collaborators can produce.
#[derive(Error, Debug)]
pub enum MatchError {
    /// The requester account, or a listing owner, could not be resolved.
    #[error("account {0} not found")]
    AccountNotFound(i64),

    /// A referenced listing could not be resolved.
    #[error("listing {0} not found")]
    ListingNotFound(i64),

    /// Malformed filter or paging parameters (e.g. non-positive page size).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An account reached the taste comparator without a hydrated artist
    /// list. This is a caller error: resolve the account through an
    /// [`AccountDirectory`](crate::feed::AccountDirectory) first. It must
    /// never be caught and treated as an account with zero taste.
    #[error("account {0} has no hydrated artist list; resolve it through the account directory first")]
    AccountNotResolved(i64),

    /// Failure inside the sqlite-backed catalog.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored row held a value the engine cannot interpret.
    #[error("invalid stored value: {0}")]
    InvalidData(String),

    /// Failure reading a fixture file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A fixture file did not parse as valid catalog JSON.
    #[error("invalid fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
