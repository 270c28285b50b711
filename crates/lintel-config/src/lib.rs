//! Site build configuration for an elm-pages style static site.
//!
//! Provides the head tag template injected into every page, the preload
//! eligibility predicate applied to emitted assets, and the `site.toml`
//! loader that wires bundler options and the deployment adapter.

pub mod context;
pub mod error;
pub mod head;
pub mod preload;
pub mod site;

pub use context::BuildContext;
pub use error::ConfigError;
pub use head::{
    escape_attr, head_tags_template, AnalyticsConfig, HeadConfig, HeadTemplate,
};
pub use preload::{preload_tag_for_file, PreloadPolicy};
pub use site::{AdapterRef, BuildSettings, SiteConfig, CONFIG_FILE};
