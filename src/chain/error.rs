use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError<K: Debug> {
    #[error("key not found in any layer: {0:?}")]
    NotFound(K),
}

impl<K: Debug> LookupError<K> {
    /// Returns the key that could not be found.
    pub fn key(&self) -> &K {
        match self {
            LookupError::NotFound(key) => key,
        }
    }
}
