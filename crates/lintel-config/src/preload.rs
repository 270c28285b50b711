//! Preload eligibility for emitted asset files.

use serde::Deserialize;

/// Suffix excluded from preload hints by default.
pub const CSS_SUFFIX: &str = ".css";

/// Decide whether an emitted asset gets a preload hint.
///
/// Stylesheets are skipped; everything else (scripts, fonts, files without an
/// extension, the empty string) is eligible. The suffix match is exact and
/// case-sensitive, so `styles.CSS` stays eligible.
pub fn preload_tag_for_file(file: &str) -> bool {
    !file.ends_with(CSS_SUFFIX)
}

/// Configurable form of [`preload_tag_for_file`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreloadPolicy {
    /// File suffixes that never get a preload hint (case-sensitive)
    #[serde(default = "default_skip_suffixes")]
    pub skip_suffixes: Vec<String>,
}

fn default_skip_suffixes() -> Vec<String> {
    vec![CSS_SUFFIX.to_string()]
}

impl Default for PreloadPolicy {
    fn default() -> Self {
        Self {
            skip_suffixes: default_skip_suffixes(),
        }
    }
}

impl PreloadPolicy {
    /// Check a file against the policy.
    pub fn allows(&self, file: &str) -> bool {
        !self
            .skip_suffixes
            .iter()
            .any(|suffix| file.ends_with(suffix.as_str()))
    }
}
