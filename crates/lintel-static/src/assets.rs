//! Asset discovery and preload hint rendering.

use std::path::{Path, PathBuf};

use lintel_config::escape_attr;
use serde::Serialize;
use walkdir::WalkDir;

/// How the browser should treat a preloaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// ES module, hinted with `modulepreload`
    Script,
    Style,
    Font,
    Image,
    /// No valid `as` destination; never hinted
    Other,
}

impl AssetKind {
    /// Classify an asset by its extension.
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        match ext {
            "js" | "mjs" => Self::Script,
            "css" => Self::Style,
            "woff2" | "woff" | "ttf" | "otf" => Self::Font,
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "avif" | "svg" => Self::Image,
            _ => Self::Other,
        }
    }
}

/// An emitted asset selected for a preload hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreloadHint {
    /// Path relative to the output directory, `/`-separated
    pub file: String,
    /// URL used in the hint
    pub href: String,
    pub kind: AssetKind,
}

impl PreloadHint {
    /// Create a hint for `file`, resolving its URL against `base_url`.
    ///
    /// Returns `None` for assets the browser has no preload destination for.
    pub fn new(file: &str, base_url: &str) -> Option<Self> {
        let kind = AssetKind::from_path(file);
        if kind == AssetKind::Other {
            return None;
        }

        let href = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            file.trim_start_matches('/')
        );
        Some(Self {
            file: file.to_string(),
            href,
            kind,
        })
    }

    /// Render the `<link>` tag for this hint.
    pub fn to_tag(&self) -> String {
        let href = escape_attr(&self.href);
        match self.kind {
            AssetKind::Script => format!(r#"<link rel="modulepreload" href="{href}">"#),
            AssetKind::Style => format!(r#"<link rel="preload" href="{href}" as="style">"#),
            AssetKind::Font => {
                let ext = Path::new(&self.file)
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("woff2");
                format!(
                    r#"<link rel="preload" href="{href}" as="font" type="font/{ext}" crossorigin>"#
                )
            }
            AssetKind::Image => format!(r#"<link rel="preload" href="{href}" as="image">"#),
            AssetKind::Other => String::new(),
        }
    }
}

/// Files found in a built output directory.
#[derive(Debug, Default)]
pub struct OutputFiles {
    /// HTML pages anywhere in the output (absolute paths)
    pub pages: Vec<PathBuf>,
    /// Bundler-emitted files, relative to the output directory
    pub assets: Vec<String>,
}

/// Walk `output_dir`, collecting every HTML page and the files under
/// `assets_dir` (relative to `output_dir`).
///
/// Files outside `assets_dir` (redirect rules, robots.txt, route data) are
/// never preload candidates. Both lists are sorted so hint order is stable
/// across builds.
pub fn scan_output(output_dir: &Path, assets_dir: &Path) -> OutputFiles {
    let mut files = OutputFiles::default();

    for entry in WalkDir::new(output_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Ok(relative) = path.strip_prefix(output_dir) else {
            continue;
        };

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext == "html" || ext == "htm" {
            files.pages.push(path.to_path_buf());
        } else if relative.starts_with(assets_dir) {
            files.assets.push(to_url_path(relative));
        }
    }

    files.pages.sort();
    files.assets.sort();
    files
}

fn to_url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_assets() {
        assert_eq!(AssetKind::from_path("app.js"), AssetKind::Script);
        assert_eq!(AssetKind::from_path("chunk.mjs"), AssetKind::Script);
        assert_eq!(AssetKind::from_path("theme.css"), AssetKind::Style);
        assert_eq!(AssetKind::from_path("fonts/a.woff2"), AssetKind::Font);
        assert_eq!(AssetKind::from_path("logo.svg"), AssetKind::Image);
        assert_eq!(AssetKind::from_path("data.json"), AssetKind::Other);
        assert_eq!(AssetKind::from_path("LICENSE"), AssetKind::Other);
    }

    #[test]
    fn renders_hint_tags() {
        let js = PreloadHint::new("assets/app.js", "/").unwrap();
        assert_eq!(js.href, "/assets/app.js");
        assert_eq!(js.to_tag(), r#"<link rel="modulepreload" href="/assets/app.js">"#);

        let font = PreloadHint::new("fonts/inter.woff2", "/site/").unwrap();
        assert_eq!(
            font.to_tag(),
            r#"<link rel="preload" href="/site/fonts/inter.woff2" as="font" type="font/woff2" crossorigin>"#
        );

        let image = PreloadHint::new("img/logo.png", "https://cdn.example.com").unwrap();
        assert_eq!(
            image.to_tag(),
            r#"<link rel="preload" href="https://cdn.example.com/img/logo.png" as="image">"#
        );
    }

    #[test]
    fn every_hint_has_a_destination() {
        assert!(PreloadHint::new("manifest.json", "/").is_none());
        assert!(PreloadHint::new("_redirects", "/").is_none());

        let style = PreloadHint::new("assets/theme.css", "/").unwrap();
        assert!(style.to_tag().contains(r#"as="style""#));
    }

    #[test]
    fn escapes_hint_urls() {
        let hint = PreloadHint::new("assets/a&b.js", "/").unwrap();

        assert_eq!(hint.to_tag(), r#"<link rel="modulepreload" href="/assets/a&amp;b.js">"#);
    }

    #[test]
    fn scans_pages_anywhere_and_assets_under_assets_dir() {
        let temp = tempdir().unwrap();
        let out = temp.path();
        fs::create_dir_all(out.join("blog/post")).unwrap();
        fs::create_dir_all(out.join("assets")).unwrap();
        fs::write(out.join("index.html"), "").unwrap();
        fs::write(out.join("blog/post/index.html"), "").unwrap();
        fs::write(out.join("blog/post/content.dat"), "").unwrap();
        fs::write(out.join("assets/b.js"), "").unwrap();
        fs::write(out.join("assets/a.css"), "").unwrap();
        fs::write(out.join("robots.txt"), "").unwrap();
        fs::write(out.join("_redirects"), "").unwrap();

        let files = scan_output(out, Path::new("assets"));

        assert_eq!(files.pages.len(), 2);
        assert_eq!(files.assets, vec!["assets/a.css", "assets/b.js"]);
    }
}
