//! Head tag injection command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use lintel_config::BuildContext;
use lintel_static::{HeadInjector, InjectConfig};

use super::load_config;

/// Run the build command.
pub fn run(config_path: &Path, output: Option<PathBuf>, cli_version: Option<String>) -> Result<()> {
    tracing::info!("Injecting head tags...");

    let config = load_config(config_path)?;
    tracing::debug!("Adapter: {}", config.adapter.module_path());

    let inject = InjectConfig {
        output_dir: output.unwrap_or(config.build.output),
        assets_dir: config.build.assets_dir,
        base_url: config.build.base_url,
        head: config.head,
        preload: config.preload,
        context: BuildContext { cli_version },
    };

    let result = HeadInjector::new(inject)?.inject()?;

    tracing::info!(
        "Injected head tags into {} pages ({} skipped) with {} preload hints in {}ms",
        result.pages,
        result.skipped,
        result.preloads,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
