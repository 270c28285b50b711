//! Write a default site configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Site build configuration

# Deployment adapter (elm-pages/adapter/<name>.js)
adapter = "netlify"

# Bundler options, passed through as-is
[vite]

[head]
stylesheet = "/style.css"
font_stylesheet = "https://use.typekit.net/qwi3qrw.css"
generator = "elm-pages"

[head.analytics]
script = "https://plausible.io/js/script.outbound-links.js"
domain = "transdimension.uk"

[preload]
# Files ending in these suffixes get no preload hint
skip_suffixes = [".css"]

[build]
output = "dist"
base_url = "/"
# Bundler output inside `output`; only these files get preload hints
assets_dir = "assets"
"#;
