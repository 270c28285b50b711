//! Report preload eligibility for file names.

use std::path::Path;

use anyhow::Result;
use lintel_config::PreloadPolicy;

use super::load_config;

/// One `<file>\t<eligible>` line per file, in argument order.
pub fn report(policy: &PreloadPolicy, files: &[String]) -> Vec<String> {
    files
        .iter()
        .map(|file| format!("{}\t{}", file, policy.allows(file)))
        .collect()
}

/// Run the preload command.
pub fn run(config_path: &Path, files: &[String]) -> Result<()> {
    let config = load_config(config_path)?;

    for line in report(&config.preload, files) {
        println!("{line}");
    }

    Ok(())
}
