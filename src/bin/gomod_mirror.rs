//! The gomod-mirror CLI.
//!
//! Invoked with no arguments it mirrors require/replace versions from the
//! root `go.mod` into `test/simulation/go.mod`, silently on success.
//! Subcommands:
//!
//! - `gomod-mirror sync` - Same mirror with explicit paths, `--dry-run`, `--verbose`
//! - `gomod-mirror check` - Read-only drift report, exits non-zero on drift
//! - `gomod-mirror list` - List nested go.mod manifests under a directory

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use gomod_mirror::mirror::{DEFAULT_SOURCE, DEFAULT_TARGET};
use gomod_mirror::{ModuleMirror, ModuleScanner};

#[derive(Parser)]
#[command(
    name = "gomod-mirror",
    version,
    about = "Mirrors go.mod dependency versions into nested simulation modules"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Mirror require/replace versions from the source into the target
    Sync {
        /// Manifest to read versions from
        #[arg(long, default_value = DEFAULT_SOURCE)]
        source: PathBuf,

        /// Manifest to rewrite
        #[arg(long, default_value = DEFAULT_TARGET)]
        target: PathBuf,

        /// Report the changes without writing the target
        #[arg(long)]
        dry_run: bool,

        /// Print the change report even when writing
        #[arg(long)]
        verbose: bool,
    },
    /// Report target entries whose versions drifted from the source
    Check {
        /// Manifest to read versions from
        #[arg(long, default_value = DEFAULT_SOURCE)]
        source: PathBuf,

        /// Manifest to compare against
        #[arg(long, default_value = DEFAULT_TARGET)]
        target: PathBuf,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List nested go.mod manifests under a directory
    List {
        /// Root directory to scan
        #[arg(default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // No subcommand means the default single-shot mirror
    let command = cli.command.unwrap_or(Commands::Sync {
        source: PathBuf::from(DEFAULT_SOURCE),
        target: PathBuf::from(DEFAULT_TARGET),
        dry_run: false,
        verbose: false,
    });

    match run(command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Sync {
            source,
            target,
            dry_run,
            verbose,
        } => {
            let report = ModuleMirror::new(source, target).mirror(dry_run)?;
            if dry_run || verbose {
                report.print();
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            source,
            target,
            json,
        } => {
            let report = ModuleMirror::new(source, target).check()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.print_terminal();
            }
            if report.has_drift() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::List { root } => {
            for manifest in ModuleScanner::new(root).find_manifests()? {
                println!("{}", manifest.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
