use crate::chain::LookupError;
use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the deep-chainmap library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError<String>),
}
