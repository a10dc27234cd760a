use thiserror::Error;

use crate::Position;

/// Convenient result alias for the highway library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a route query names a station that is not registered.
    #[error("unknown station at position {position}")]
    UnknownStation { position: Position },

    /// Raised when a station expected in a route snapshot could not be found.
    ///
    /// The snapshot is built from the same station map the query was checked
    /// against, so this indicates a bug rather than bad input.
    #[error("station {position} missing from route snapshot")]
    StationNotInSnapshot { position: Position },

    /// Raised when a configuration value is out of its accepted domain.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
