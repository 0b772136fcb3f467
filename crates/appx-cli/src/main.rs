//! appx-prepare CLI
//!
//! Thin front-end over `appx-core`: loads the descriptor, discovers
//! the platform project and runs one sync.

mod cli;
mod error;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use appx_core::{AppConfig, ProjectHandle, ProjectSync};
use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Sync {
            app_root,
            project,
            config,
            json,
        }) => {
            let config_path = config.unwrap_or_else(|| app_root.join("config.xml"));
            cmd_sync(&app_root, &project, &config_path, json)
        }
        None => {
            println!("{} appx-prepare", "appx-prep".green().bold());
            println!();
            println!("Run {} for available commands.", "appx-prep --help".cyan());
            Ok(())
        }
    }
}

fn cmd_sync(app_root: &Path, project_dir: &Path, config_path: &Path, json: bool) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let handle = ProjectHandle::discover(project_dir)?;

    let report = ProjectSync::new(handle, app_root).sync(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for action in &report.actions {
            println!("{} {}", "✓".green(), action);
        }
        println!(
            "{} {} synced",
            "done:".green().bold(),
            project_dir.display()
        );
    }

    Ok(())
}
