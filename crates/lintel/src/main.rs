//! Lintel CLI - build configuration for an elm-pages style static site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "lintel")]
#[command(about = "Head tags, preload hints and adapter wiring for a static site build")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, default_value = lintel_config::CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default site.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the head tags injected into every page
    Head {
        /// Generator version to interpolate
        #[arg(long, conflicts_with = "context")]
        cli_version: Option<String>,

        /// JSON file holding the build context
        #[arg(long)]
        context: Option<PathBuf>,
    },

    /// Report which files get a preload hint
    Preload {
        /// File names or paths to check
        files: Vec<String>,
    },

    /// Inject head tags and preload hints into a built site
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generator version to interpolate
        #[arg(long)]
        cli_version: Option<String>,
    },

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to config or "dist")
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Head {
            cli_version,
            context,
        } => {
            commands::head::run(&cli.config, cli_version, context)?;
        }
        Commands::Preload { files } => {
            commands::preload::run(&cli.config, &files)?;
        }
        Commands::Build {
            output,
            cli_version,
        } => {
            commands::build::run(&cli.config, output, cli_version)?;
        }
        Commands::Serve { port, dir, no_open } => {
            commands::serve::run(&cli.config, port, dir, !no_open).await?;
        }
        Commands::Config => {
            commands::config::run(&cli.config)?;
        }
    }

    Ok(())
}
