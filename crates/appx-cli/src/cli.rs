//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// appx-prepare - Sync an app descriptor into a Windows Store project
#[derive(Parser, Debug)]
#[command(name = "appx-prep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Reconcile the manifest and project file with the app descriptor
    ///
    /// Examples:
    ///   appx-prep sync --project platforms/windows
    ///   appx-prep sync my-app --project my-app/platforms/windows --json
    Sync {
        /// Application root holding config.xml, assets and hooks/
        #[arg(default_value = ".")]
        app_root: PathBuf,

        /// Platform project directory (contains the .jsproj/.projitems)
        #[arg(short, long)]
        project: PathBuf,

        /// Descriptor path (defaults to <APP_ROOT>/config.xml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output the sync report as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
