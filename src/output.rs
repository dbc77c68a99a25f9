//! Output formatting and styling module.
//!
//! Centralizes CLI output: colored status lines, the per-pass progress
//! bar, and the summary table. Keeping the styling here means the rest of
//! the crate only decides what to say, not how it looks.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::organizer::MoveSummary;

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message to stderr in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates the progress bar for an organization pass.
    ///
    /// Per-file report lines should go through [`ProgressBar::suspend`]
    /// so they interleave cleanly with the bar.
    pub fn pass_progress(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:30.green/white}] {pos}/{len}")
                .expect("Invalid progress bar template")
                .progress_chars("=> "),
        );
        pb
    }

    /// Prints the summary table with per-category file counts.
    ///
    /// Categories are listed sorted by name, followed by a total row.
    pub fn summary_table(summary: &MoveSummary) {
        Self::header("SUMMARY");

        let counts = summary.category_counts();
        let width = counts
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(8); // at least "Category" wide

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (category, count) in &counts {
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                file_word,
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        let total = summary.total();
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            if total == 1 { "file" } else { "files" },
            width = width
        );
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}
