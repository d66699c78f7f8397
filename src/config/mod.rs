//! Loading configuration sources into layer stacks.

mod builder;
mod env;
mod error;
mod file;
mod layers;
mod source;

pub use builder::LayersBuilder;
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use layers::Layers;
pub use source::{Layer, LayerSource, TableSource};
