//! Head tag injection over a built site.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Instant;

use rayon::prelude::*;
use regex::Regex;

use lintel_config::{BuildContext, HeadConfig, HeadTemplate, PreloadPolicy};

use crate::assets::{scan_output, PreloadHint};

/// File listing the preloaded assets, written next to the pages.
pub const MANIFEST_FILE: &str = "preload-manifest.json";

/// Opens the injected block in every page.
pub const BLOCK_START: &str = "<!-- lintel:head -->";

/// Closes the injected block in every page.
pub const BLOCK_END: &str = "<!-- /lintel:head -->";

static HEAD_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</head\s*>").expect("valid regex"));

static INJECTED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!-- lintel:head -->.*?<!-- /lintel:head -->\n?").expect("valid regex")
});

/// Configuration for an injection pass.
#[derive(Debug, Clone)]
pub struct InjectConfig {
    /// Built site to post-process
    pub output_dir: PathBuf,

    /// Bundler output, relative to `output_dir`
    pub assets_dir: PathBuf,

    /// URL prefix for preload hints
    pub base_url: String,

    pub head: HeadConfig,

    pub preload: PreloadPolicy,

    /// Context passed to the head template for every page
    pub context: BuildContext,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            assets_dir: PathBuf::from("assets"),
            base_url: "/".to_string(),
            head: HeadConfig::default(),
            preload: PreloadPolicy::default(),
            context: BuildContext::default(),
        }
    }
}

/// Result of an injection pass.
#[derive(Debug)]
pub struct InjectResult {
    /// Pages whose head block was inserted or refreshed
    pub pages: usize,

    /// Pages left untouched (block already current, or no `</head>`)
    pub skipped: usize,

    /// Assets that got a preload hint
    pub preloads: usize,

    /// Total time in milliseconds
    pub duration_ms: u64,

    pub output_dir: PathBuf,
}

/// Errors that can occur during injection.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("Failed to read output: {0}")]
    ReadError(String),

    #[error("Failed to render head tags: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Failed to inject {count} page(s): {messages}")]
    PageErrors { count: usize, messages: String },
}

impl From<lintel_config::ConfigError> for InjectError {
    fn from(err: lintel_config::ConfigError) -> Self {
        Self::TemplateError(err.to_string())
    }
}

/// Outcome for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageOutcome {
    Injected,
    Unchanged,
    NoHead,
}

/// Injects head tags and preload hints into every page of a built site.
pub struct HeadInjector {
    config: InjectConfig,
    template: HeadTemplate,
}

impl HeadInjector {
    /// Create an injector, compiling the head template.
    pub fn new(config: InjectConfig) -> Result<Self, InjectError> {
        let template = HeadTemplate::new(config.head.clone())?;
        Ok(Self { config, template })
    }

    /// Run the injection pass.
    ///
    /// A page that fails does not stop the others; failures are reported
    /// together after the manifest has been written.
    pub fn inject(&self) -> Result<InjectResult, InjectError> {
        let start = Instant::now();
        let output_dir = &self.config.output_dir;

        if !output_dir.is_dir() {
            return Err(InjectError::ReadError(format!(
                "Output directory not found: {}",
                output_dir.display()
            )));
        }

        if !self.config.context.has_version() {
            tracing::warn!("Build context has no cliVersion; generator meta tag will be empty");
        }

        let files = scan_output(output_dir, &self.config.assets_dir);

        let hints = self.select_hints(&files.assets);
        let head = self.template.render(&self.config.context)?;
        let fragment = build_fragment(&head, &hints);

        // Pages are independent; render once, insert in parallel
        let outcomes: Vec<Result<PageOutcome, InjectError>> = files
            .pages
            .par_iter()
            .map(|page| inject_page(page, &fragment))
            .collect();

        let mut pages = 0;
        let mut skipped = 0;
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(PageOutcome::Injected) => pages += 1,
                Ok(PageOutcome::Unchanged | PageOutcome::NoHead) => skipped += 1,
                Err(e) => {
                    tracing::error!("{}", e);
                    failures.push(e.to_string());
                }
            }
        }

        self.write_manifest(&hints)?;

        if !failures.is_empty() {
            return Err(InjectError::PageErrors {
                count: failures.len(),
                messages: failures.join("; "),
            });
        }

        Ok(InjectResult {
            pages,
            skipped,
            preloads: hints.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: output_dir.clone(),
        })
    }

    /// Ask the preload policy about every emitted asset.
    fn select_hints(&self, assets: &[String]) -> Vec<PreloadHint> {
        assets
            .iter()
            .filter(|file| {
                let eligible = self.config.preload.allows(file);
                tracing::debug!("preload {} -> {}", file, eligible);
                eligible
            })
            .filter_map(|file| {
                let hint = PreloadHint::new(file, &self.config.base_url);
                if hint.is_none() {
                    tracing::debug!("No preload destination for {}", file);
                }
                hint
            })
            .collect()
    }

    fn write_manifest(&self, hints: &[PreloadHint]) -> Result<(), InjectError> {
        let manifest = serde_json::json!({
            "context": {
                "cliVersion": self.config.context.cli_version,
            },
            "preload": hints,
        });

        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| InjectError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join(MANIFEST_FILE), json)
            .map_err(|e| InjectError::WriteError(e.to_string()))
    }
}

/// Head fragment and hint tags wrapped in the block markers.
fn build_fragment(head: &str, hints: &[PreloadHint]) -> String {
    let mut fragment = format!("{BLOCK_START}\n{head}\n");
    for hint in hints {
        fragment.push_str(&hint.to_tag());
        fragment.push('\n');
    }
    fragment.push_str(BLOCK_END);
    fragment.push('\n');
    fragment
}

/// Place `fragment` in `html`.
///
/// An existing marker block is replaced; otherwise the fragment goes before
/// the first `</head>`. Returns `None` when the page has neither.
fn apply_fragment(html: &str, fragment: &str) -> Option<String> {
    let (start, end) = match INJECTED_BLOCK.find(html) {
        Some(block) => (block.start(), block.end()),
        None => {
            let close = HEAD_CLOSE.find(html)?;
            (close.start(), close.start())
        }
    };

    let mut out = String::with_capacity(html.len() + fragment.len());
    out.push_str(&html[..start]);
    out.push_str(fragment);
    out.push_str(&html[end..]);
    Some(out)
}

fn inject_page(path: &Path, fragment: &str) -> Result<PageOutcome, InjectError> {
    let html = fs::read_to_string(path)
        .map_err(|e| InjectError::ReadError(format!("{}: {}", path.display(), e)))?;

    let Some(updated) = apply_fragment(&html, fragment) else {
        tracing::warn!("No </head> in {}, leaving it untouched", path.display());
        return Ok(PageOutcome::NoHead);
    };

    if updated == html {
        tracing::debug!("Head block already current in {}", path.display());
        return Ok(PageOutcome::Unchanged);
    }

    fs::write(path, updated)
        .map_err(|e| InjectError::WriteError(format!("{}: {}", path.display(), e)))?;

    Ok(PageOutcome::Injected)
}
