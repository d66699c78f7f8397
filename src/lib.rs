//! Layered, priority-ordered views over nested mappings.
//!
//! [`DeepChainMap`] answers lookups across a stack of layers, recursing into
//! nested mappings, and flattens the stack into one owned map. [`Layers`]
//! loads such a stack from TOML files, environment variables and in-memory
//! tables.

pub mod chain;
pub mod config;
mod error;

pub use chain::{DeepChainMap, LookupError, Map, Resolved, Value};
pub use config::{ConfigError, Layers};
pub use error::Error;
