//! CLI command implementations.

pub mod build;
pub mod config;
pub mod head;
pub mod init;
pub mod preload;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use lintel_config::SiteConfig;

/// Load site.toml, falling back to defaults when it is absent.
pub fn load_config(path: &Path) -> Result<SiteConfig> {
    SiteConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}
