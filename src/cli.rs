//! Command-line surface for tidyshelf.
//!
//! This module handles:
//! - Argument parsing
//! - Filter configuration loading
//! - Self-executable resolution for the skip rule
//! - Orchestration of the pass and the closing summary block

use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::FilterConfig;
use crate::organizer::{OrganizeOptions, Organizer};
use crate::output::OutputFormatter;

/// Sort a directory's loose files into category shelves.
#[derive(Debug, Parser)]
#[command(name = "tidyshelf", version, about)]
pub struct Cli {
    /// Directory to organize. Defaults to the current working directory.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Report intended moves without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Filter configuration file (TOML).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Runs the CLI application.
///
/// Loads and compiles the filter configuration, runs one organization
/// pass over the requested directory, and prints the summary block with a
/// closing line that depends on the mode and whether anything moved.
///
/// Returns a printable error message on failure; the binary maps any
/// error to a non-zero exit status.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use tidyshelf::cli::{Cli, run};
///
/// let cli = Cli::parse_from(["tidyshelf", "/home/user/Downloads", "--dry-run"]);
/// match run(&cli) {
///     Ok(()) => println!("Operation completed successfully"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run(cli: &Cli) -> Result<(), String> {
    let config = FilterConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    let options = OrganizeOptions {
        dry_run: cli.dry_run,
        self_name: self_executable_name(),
        filters,
    };

    if cli.dry_run {
        OutputFormatter::dry_run_notice(&format!("Organizing: {}", cli.directory.display()));
    } else {
        OutputFormatter::info(&format!("Organizing: {}", cli.directory.display()));
    }

    let summary = Organizer::organize(&cli.directory, &options).map_err(|e| e.to_string())?;

    if summary.is_empty() {
        OutputFormatter::plain("Nothing to organize — no files found.");
        return Ok(());
    }

    OutputFormatter::summary_table(&summary);
    if cli.dry_run {
        OutputFormatter::dry_run_notice("Dry run complete. No files were moved.");
    } else {
        OutputFormatter::success("Done!");
    }

    Ok(())
}

/// Name of the running executable.
///
/// Used to skip the tool itself when it sits inside the target directory.
fn self_executable_name() -> Option<OsString> {
    env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(OsString::from))
}
