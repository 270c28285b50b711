//! Print the resolved configuration.

use std::path::Path;

use anyhow::Result;
use lintel_config::SiteConfig;

use super::load_config;

/// Resolved configuration as JSON, with the adapter module spelled out.
pub fn resolve(config: &SiteConfig) -> serde_json::Value {
    serde_json::json!({
        "adapter": {
            "name": config.adapter.name(),
            "module": config.adapter.module_path(),
        },
        "vite": config.bundler_options(),
        "head": {
            "stylesheet": config.head.stylesheet,
            "analytics": {
                "script": config.head.analytics.script,
                "domain": config.head.analytics.domain,
            },
            "generator": config.head.generator,
            "font_stylesheet": config.head.font_stylesheet,
            "template": config.head.template.as_ref().map(|p| p.display().to_string()),
        },
        "preload": {
            "skip_suffixes": config.preload.skip_suffixes,
        },
        "build": {
            "output": config.build.output.display().to_string(),
            "base_url": config.build.base_url,
            "assets_dir": config.build.assets_dir.display().to_string(),
        },
    })
}

/// Run the config command.
pub fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    println!("{}", serde_json::to_string_pretty(&resolve(&config))?);

    Ok(())
}
