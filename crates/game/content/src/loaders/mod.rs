//! Content loaders for reading ability data from files.
//!
//! Loaders convert TOML files into the catalog and configuration types the
//! engine consumes.

pub mod abilities;
pub mod config;
pub mod factory;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
