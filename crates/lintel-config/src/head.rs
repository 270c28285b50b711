//! Head tag template injected into every generated page.
//!
//! The default output is part of the site's compatibility surface:
//!
//! ```html
//! <link rel="stylesheet" href="/style.css">
//! <script defer="defer" data-domain="transdimension.uk" src="https://plausible.io/js/script.outbound-links.js"></script>
//! <meta name="generator" content="elm-pages v{cli_version}">
//! <link rel="stylesheet" preload href="https://use.typekit.net/qwi3qrw.css">
//! ```

use std::fs;
use std::path::PathBuf;

use minijinja::{context, AutoEscape, Environment};
use serde::{Deserialize, Serialize};

use crate::context::BuildContext;
use crate::error::ConfigError;

/// Local stylesheet linked from every page.
pub const STYLESHEET: &str = "/style.css";

/// Analytics script source.
pub const ANALYTICS_SCRIPT: &str = "https://plausible.io/js/script.outbound-links.js";

/// Site identifier sent with analytics events.
pub const ANALYTICS_DOMAIN: &str = "transdimension.uk";

/// External font stylesheet.
pub const FONT_STYLESHEET: &str = "https://use.typekit.net/qwi3qrw.css";

/// Generator name prefixed to the CLI version in the meta tag.
pub const GENERATOR: &str = "elm-pages";

const TEMPLATE_NAME: &str = "head.html";

/// Analytics script settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Script URL, loaded deferred
    #[serde(default = "default_analytics_script")]
    pub script: String,

    /// Value of the `data-domain` attribute
    #[serde(default = "default_analytics_domain")]
    pub domain: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            script: default_analytics_script(),
            domain: default_analytics_domain(),
        }
    }
}

/// Head tag settings (`[head]` in site.toml).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadConfig {
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default = "default_generator")]
    pub generator: String,

    #[serde(default = "default_font_stylesheet")]
    pub font_stylesheet: String,

    /// Optional path to a template replacing the built-in head fragment
    #[serde(default)]
    pub template: Option<PathBuf>,
}

fn default_stylesheet() -> String {
    STYLESHEET.to_string()
}
fn default_analytics_script() -> String {
    ANALYTICS_SCRIPT.to_string()
}
fn default_analytics_domain() -> String {
    ANALYTICS_DOMAIN.to_string()
}
fn default_generator() -> String {
    GENERATOR.to_string()
}
fn default_font_stylesheet() -> String {
    FONT_STYLESHEET.to_string()
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            stylesheet: default_stylesheet(),
            analytics: AnalyticsConfig::default(),
            generator: default_generator(),
            font_stylesheet: default_font_stylesheet(),
            template: None,
        }
    }
}

/// Renders the head fragment for a build context.
pub struct HeadTemplate {
    env: Environment<'static>,
    config: HeadConfig,
}

impl HeadTemplate {
    /// Compile the head template, reading the override file if one is configured.
    pub fn new(config: HeadConfig) -> Result<Self, ConfigError> {
        let source = match &config.template {
            Some(path) => fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?,
            None => HEAD_TEMPLATE.to_string(),
        };

        let mut env = Environment::new();
        // Configured attribute values go through `attr`; cli_version is emitted raw.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("attr", |value: String| escape_attr(&value));
        env.add_template_owned(TEMPLATE_NAME.to_string(), source)?;

        Ok(Self { env, config })
    }

    /// Render the head fragment.
    ///
    /// Output depends only on the configuration and `context`. The version is
    /// interpolated verbatim; a context without one renders an empty version
    /// after the generator name.
    pub fn render(&self, context: &BuildContext) -> Result<String, ConfigError> {
        let tmpl = self.env.get_template(TEMPLATE_NAME)?;

        let html = tmpl.render(context! {
            stylesheet => &self.config.stylesheet,
            analytics => &self.config.analytics,
            generator => &self.config.generator,
            font_stylesheet => &self.config.font_stylesheet,
            cli_version => context.version(),
        })?;

        Ok(html)
    }
}

/// Render the default head fragment for `context`.
pub fn head_tags_template(context: &BuildContext) -> Result<String, ConfigError> {
    HeadTemplate::new(HeadConfig::default())?.render(context)
}

/// Escape a value for use inside a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

const HEAD_TEMPLATE: &str = r##"<link rel="stylesheet" href="{{ stylesheet | attr }}">
<script defer="defer" data-domain="{{ analytics.domain | attr }}" src="{{ analytics.script | attr }}"></script>
<meta name="generator" content="{{ generator | attr }} v{{ cli_version }}">
<link rel="stylesheet" preload href="{{ font_stylesheet | attr }}">"##;
