//! Build context handed to the head template by the build pipeline.

use serde::Deserialize;

/// Read-only build context supplied once per build.
///
/// Only the generator version is consumed. Any other keys the pipeline sends
/// along are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BuildContext {
    /// Version of the site generator CLI (`cliVersion` on the wire)
    #[serde(default, rename = "cliVersion")]
    pub cli_version: Option<String>,
}

impl BuildContext {
    /// Create a context carrying the given generator version.
    pub fn new(cli_version: impl Into<String>) -> Self {
        Self {
            cli_version: Some(cli_version.into()),
        }
    }

    /// Parse a context from the pipeline's JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Version string used for interpolation.
    ///
    /// A missing version interpolates as the empty string.
    pub fn version(&self) -> &str {
        self.cli_version.as_deref().unwrap_or("")
    }

    /// Whether the pipeline supplied a version.
    pub fn has_version(&self) -> bool {
        self.cli_version.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_version_from_json() {
        let ctx = BuildContext::from_json(r#"{"cliVersion": "3.2.1"}"#).unwrap();

        assert_eq!(ctx.version(), "3.2.1");
        assert!(ctx.has_version());
    }

    #[test]
    fn ignores_extra_pipeline_keys() {
        let ctx =
            BuildContext::from_json(r#"{"cliVersion": "3.0.0", "route": "/blog"}"#).unwrap();

        assert_eq!(ctx, BuildContext::new("3.0.0"));
    }

    #[test]
    fn missing_version_interpolates_empty() {
        let ctx = BuildContext::from_json("{}").unwrap();

        assert!(!ctx.has_version());
        assert_eq!(ctx.version(), "");
    }
}
