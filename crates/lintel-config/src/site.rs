//! Site configuration file (site.toml).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::head::HeadConfig;
use crate::preload::PreloadPolicy;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "site.toml";

/// Adapter used when the configuration names none.
pub const DEFAULT_ADAPTER: &str = "netlify";

/// Named reference to a deployment adapter.
///
/// The adapter is never invoked from here; the reference is handed to the
/// pipeline as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterRef(String);

impl AdapterRef {
    /// Create an adapter reference, rejecting blank names.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::AdapterError(
                "adapter name must not be empty".to_string(),
            ));
        }
        if trimmed.contains(['/', '\\']) {
            return Err(ConfigError::AdapterError(format!(
                "adapter name must not contain path separators: {trimmed}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Module the pipeline imports for this adapter.
    pub fn module_path(&self) -> String {
        format!("elm-pages/adapter/{}.js", self.0)
    }
}

impl Default for AdapterRef {
    fn default() -> Self {
        Self(DEFAULT_ADAPTER.to_string())
    }
}

impl fmt::Display for AdapterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AdapterRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        AdapterRef::new(name).map_err(serde::de::Error::custom)
    }
}

/// Output settings (`[build]` in site.toml).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSettings {
    /// Directory holding the built site
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// URL prefix for asset links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bundler output inside `output`; only these files are preload candidates
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            base_url: default_base_url(),
            assets_dir: default_assets_dir(),
        }
    }
}

/// The complete site build configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Deployment adapter reference
    #[serde(default)]
    pub adapter: AdapterRef,

    /// Bundler options, passed through untouched
    #[serde(default)]
    pub vite: toml::Table,

    #[serde(default)]
    pub head: HeadConfig,

    #[serde(default)]
    pub preload: PreloadPolicy,

    #[serde(default)]
    pub build: BuildSettings,
}

impl SiteConfig {
    /// Parse configuration from TOML source.
    ///
    /// `origin` only labels errors. Relative template paths are resolved
    /// against `base_dir`.
    pub fn parse(source: &str, origin: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: SiteConfig =
            toml::from_str(source).map_err(|e| ConfigError::ParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        if let Some(template) = config.head.template.take() {
            config.head.template = Some(if template.is_relative() {
                base_dir.join(template)
            } else {
                template
            });
        }

        Ok(config)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults; a file that exists but cannot be
    /// read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let source = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let base_dir = path.parent().unwrap_or(Path::new(""));
        let config = Self::parse(&source, &path.display().to_string(), base_dir)?;
        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Bundler options as JSON, for handing to the bundler.
    pub fn bundler_options(&self) -> serde_json::Value {
        serde_json::to_value(&self.vite)
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_source_yields_defaults() {
        let config = SiteConfig::parse("", "site.toml", Path::new("")).unwrap();

        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.adapter.name(), "netlify");
        assert_eq!(config.head, HeadConfig::default());
        assert_eq!(config.preload, PreloadPolicy::default());
        assert!(config.vite.is_empty());
    }

    #[test]
    fn parses_full_config() {
        let source = r#"
adapter = "static"

[vite]
base = "/app/"

[vite.build]
sourcemap = true

[head]
generator = "custom"

[head.analytics]
domain = "example.org"

[preload]
skip_suffixes = [".css", ".map"]

[build]
output = "public"
base_url = "/site/"
assets_dir = "_app"
"#;

        let config = SiteConfig::parse(source, "site.toml", Path::new("")).unwrap();

        assert_eq!(config.adapter.module_path(), "elm-pages/adapter/static.js");
        assert_eq!(config.head.generator, "custom");
        assert_eq!(config.head.analytics.domain, "example.org");
        assert_eq!(
            config.head.analytics.script,
            "https://plausible.io/js/script.outbound-links.js"
        );
        assert_eq!(config.preload.skip_suffixes, vec![".css", ".map"]);
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.base_url, "/site/");
        assert_eq!(config.build.assets_dir, PathBuf::from("_app"));
    }

    #[test]
    fn passes_bundler_options_through() {
        let source = "[vite]\nbase = \"/app/\"\n[vite.server]\nport = 3000\n";
        let config = SiteConfig::parse(source, "site.toml", Path::new("")).unwrap();

        assert_eq!(
            config.bundler_options(),
            serde_json::json!({ "base": "/app/", "server": { "port": 3000 } })
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = SiteConfig::parse("[head]\nfavicon = \"x\"\n", "site.toml", Path::new(""));

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn rejects_blank_adapter() {
        let result = SiteConfig::parse("adapter = \"  \"\n", "site.toml", Path::new(""));

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
        assert!(matches!(AdapterRef::new(""), Err(ConfigError::AdapterError(_))));
        assert!(matches!(
            AdapterRef::new("../evil"),
            Err(ConfigError::AdapterError(_))
        ));
    }

    #[test]
    fn resolves_template_relative_to_config() {
        let source = "[head]\ntemplate = \"head.html\"\n";
        let config = SiteConfig::parse(source, "site.toml", Path::new("/srv/site")).unwrap();

        assert_eq!(
            config.head.template,
            Some(PathBuf::from("/srv/site/head.html"))
        );
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = SiteConfig::load(&temp.path().join("site.toml")).unwrap();

        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_reports_malformed_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "adapter = [").unwrap();

        assert!(matches!(
            SiteConfig::load(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
