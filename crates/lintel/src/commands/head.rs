//! Print the head fragment.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lintel_config::{BuildContext, HeadTemplate};

use super::load_config;

/// Resolve the build context from flags.
///
/// `--context` takes a JSON object as emitted by the build pipeline.
pub fn resolve_context(
    cli_version: Option<String>,
    context: Option<&Path>,
) -> Result<BuildContext> {
    if let Some(path) = context {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read context {}", path.display()))?;
        return BuildContext::from_json(&json)
            .with_context(|| format!("Failed to parse context {}", path.display()));
    }

    Ok(BuildContext { cli_version })
}

/// Run the head command.
pub fn run(config_path: &Path, cli_version: Option<String>, context: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let context = resolve_context(cli_version, context.as_deref())?;

    if !context.has_version() {
        tracing::warn!("No cliVersion given; generator meta tag will be empty");
    }

    let html = HeadTemplate::new(config.head)?.render(&context)?;
    println!("{html}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_context_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("context.json");
        fs::write(&path, r#"{"cliVersion": "3.2.1"}"#).unwrap();

        let ctx = resolve_context(None, Some(&path)).unwrap();

        assert_eq!(ctx.version(), "3.2.1");
    }

    #[test]
    fn falls_back_to_flag() {
        let ctx = resolve_context(Some("1.0.0".to_string()), None).unwrap();
        assert_eq!(ctx, BuildContext::new("1.0.0"));

        let ctx = resolve_context(None, None).unwrap();
        assert!(!ctx.has_version());
    }

    #[test]
    fn rejects_malformed_context() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("context.json");
        fs::write(&path, "not json").unwrap();

        assert!(resolve_context(None, Some(&path)).is_err());
    }
}
