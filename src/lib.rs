pub mod config;
pub mod error;
pub mod graph;
pub mod locations;
pub mod output;
pub mod sync;
pub mod test_utils;

pub use error::{Result, SkillMapError};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
