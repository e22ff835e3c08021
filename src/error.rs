//! Error type shared by the routing engine and its adapters.

use thiserror::Error;

/// Errors raised by the routing engine.
///
/// Infeasible assignments and missing roads are not errors; they surface as
/// unassigned locations and `None` edge lookups respectively.
#[derive(Error, Debug)]
pub enum RoutingError {
    /// A query referenced an id that is neither a location nor a road endpoint.
    #[error("location {0} is not part of the graph")]
    UnknownLocation(usize),
    /// A cost weight was negative or not finite.
    #[error("cost weight `{name}` must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Which weight was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Loaded problem data violated the data model.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Reading or writing a problem/solution file failed.
    #[cfg(feature = "json")]
    #[error("failed to access {path}")]
    Io {
        /// File that could not be accessed.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A problem/solution document could not be (de)serialized.
    #[cfg(feature = "json")]
    #[error("malformed JSON document")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;
