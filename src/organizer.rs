/// Single-pass directory organization.
///
/// This module scans the immediate children of a target directory,
/// classifies each regular file by extension, and relocates it into the
/// matching category subdirectory. Destination collisions are resolved by
/// probing numbered alternatives built from the original file stem.
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use colored::*;
use indicatif::ProgressBar;

use crate::category::{Category, ExtensionMap};
use crate::config::CompiledFilters;
use crate::output::OutputFormatter;

/// Upper bound on numbered probes for a single destination.
const MAX_COLLISION_PROBES: usize = 10_000;

/// Per-invocation record of which files were placed under which category.
///
/// File names are recorded under their resolved category in processing
/// order, using the source name rather than any collision-renamed name.
/// The record is built identically in dry-run mode.
#[derive(Debug, Clone, Default)]
pub struct MoveSummary {
    entries: HashMap<Category, Vec<String>>,
}

impl MoveSummary {
    /// Records a processed file under its category.
    fn record(&mut self, category: Category, name: &str) {
        self.entries
            .entry(category)
            .or_default()
            .push(name.to_string());
    }

    /// Total number of files recorded.
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true if no files were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File names recorded under a category, in processing order.
    pub fn files_for(&self, category: Category) -> &[String] {
        self.entries
            .get(&category)
            .map(|files| files.as_slice())
            .unwrap_or(&[])
    }

    /// Per-category counts sorted by category name.
    pub fn category_counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<_> = self
            .entries
            .iter()
            .map(|(category, files)| (category.dir_name(), files.len()))
            .collect();
        counts.sort_by_key(|&(name, _)| name);
        counts
    }
}

/// Errors that can occur during an organization pass.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target path does not exist or is not a directory.
    InvalidTarget { path: PathBuf, source: io::Error },
    /// Failed to enumerate the target directory.
    ScanFailed { path: PathBuf, source: io::Error },
    /// Failed to create a category directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to move a file to its destination.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: io::Error,
    },
    /// The collision probe ran out of numbered candidates.
    CollisionExhausted { destination: PathBuf },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTarget { path, source } => {
                write!(
                    f,
                    "'{}' is not a valid directory: {}",
                    path.display(),
                    source
                )
            }
            Self::ScanFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::CollisionExhausted { destination } => {
                write!(
                    f,
                    "Exhausted rename candidates for {}",
                    destination.display()
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Settings for one organization pass.
///
/// Everything the pass depends on arrives here; the organizer reads no
/// ambient process state.
pub struct OrganizeOptions {
    /// Compute and report moves without touching the filesystem.
    pub dry_run: bool,
    /// Name of the tool's own executable, skipped by exact match when it
    /// sits inside the target directory.
    pub self_name: Option<OsString>,
    /// Compiled filter rules deciding which files the pass touches.
    pub filters: CompiledFilters,
}

impl OrganizeOptions {
    /// Options with default filters and no self-exclusion.
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            self_name: None,
            filters: CompiledFilters::default(),
        }
    }
}

/// Organizes files by moving them into category subdirectories.
pub struct Organizer;

impl Organizer {
    /// Runs one classify-then-move pass over the target directory.
    ///
    /// Immediate children are processed in lexicographic name order, so
    /// reruns on an unchanged directory produce identical move order and
    /// identical collision-suffix assignment. Subdirectories are never
    /// entered or moved. In dry-run mode the pass computes and reports
    /// identically but performs no filesystem mutation.
    ///
    /// One report line per processed file is written to standard output
    /// in both modes.
    ///
    /// # Arguments
    ///
    /// * `target` - The directory whose top-level files are organized
    /// * `options` - Mode, self-exclusion, and filter rules for the pass
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tidyshelf::organizer::{OrganizeOptions, Organizer};
    /// use std::path::Path;
    ///
    /// let result = Organizer::organize(
    ///     Path::new("/home/user/Downloads"),
    ///     &OrganizeOptions::new(true),
    /// );
    ///
    /// match result {
    ///     Ok(summary) => println!("{} file(s) would move", summary.total()),
    ///     Err(e) => eprintln!("Organization failed: {}", e),
    /// }
    /// ```
    pub fn organize(target: &Path, options: &OrganizeOptions) -> OrganizeResult<MoveSummary> {
        let target = fs::canonicalize(target).map_err(|e| OrganizeError::InvalidTarget {
            path: target.to_path_buf(),
            source: e,
        })?;
        if !target.is_dir() {
            return Err(OrganizeError::InvalidTarget {
                path: target.clone(),
                source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            });
        }

        let reader = fs::read_dir(&target).map_err(|e| OrganizeError::ScanFailed {
            path: target.clone(),
            source: e,
        })?;
        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| OrganizeError::ScanFailed {
                path: target.clone(),
                source: e,
            })?;
            entries.push(entry);
        }
        // Lexicographic order keeps reruns deterministic, collision
        // suffixes included.
        entries.sort_by_key(|entry| entry.file_name());

        let map = ExtensionMap::default();
        let mut summary = MoveSummary::default();
        let progress = OutputFormatter::pass_progress(entries.len() as u64);

        for entry in entries {
            let file_type = entry.file_type().map_err(|e| OrganizeError::ScanFailed {
                path: entry.path(),
                source: e,
            })?;
            if file_type.is_dir() {
                progress.inc(1);
                continue;
            }

            let name = entry.file_name();
            if options.self_name.as_ref() == Some(&name) {
                progress.inc(1);
                continue;
            }
            if !options.filters.should_include(&entry.path()) {
                progress.inc(1);
                continue;
            }

            let name_str = name.to_string_lossy().into_owned();
            let category = map.category_for_path(Path::new(&name));
            let category_dir = target.join(category.dir_name());
            let destination = Self::resolve_destination(&category_dir, Path::new(&name))?;

            let renamed = if destination.file_name() != Some(name.as_os_str()) {
                destination
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            } else {
                None
            };
            Self::report(
                &progress,
                options.dry_run,
                &name_str,
                category,
                renamed.as_deref(),
            );

            if !options.dry_run {
                if !category_dir.exists() {
                    fs::create_dir(&category_dir).map_err(|e| {
                        OrganizeError::DirectoryCreationFailed {
                            path: category_dir.clone(),
                            source: e,
                        }
                    })?;
                }
                fs::rename(entry.path(), &destination).map_err(|e| {
                    OrganizeError::FileMoveFailure {
                        source: entry.path(),
                        destination: destination.clone(),
                        source_error: e,
                    }
                })?;
            }

            summary.record(category, &name_str);
            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(summary)
    }

    /// Picks an unused destination path inside the category directory.
    ///
    /// The source name is kept when free; otherwise numbered alternatives
    /// built from the original stem are probed in strictly increasing
    /// order (`a_1.txt`, `a_2.txt`, ...). The probe is capped so a
    /// directory packed with numbered collisions fails instead of looping.
    fn resolve_destination(category_dir: &Path, file_name: &Path) -> OrganizeResult<PathBuf> {
        let candidate = category_dir.join(file_name);
        if !candidate.exists() {
            return Ok(candidate);
        }

        let stem = file_name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = file_name
            .extension()
            .map(|e| e.to_string_lossy().into_owned());

        for counter in 1..=MAX_COLLISION_PROBES {
            let alternative = match &extension {
                Some(ext) => format!("{}_{}.{}", stem, counter, ext),
                None => format!("{}_{}", stem, counter),
            };
            let candidate = category_dir.join(alternative);
            if !candidate.exists() {
                return Ok(candidate);
            }
        }

        Err(OrganizeError::CollisionExhausted {
            destination: category_dir.join(file_name),
        })
    }

    /// Emits one report line for a processed file.
    fn report(
        progress: &ProgressBar,
        dry_run: bool,
        name: &str,
        category: Category,
        renamed_to: Option<&str>,
    ) {
        let action = if dry_run {
            "[WOULD MOVE]".yellow()
        } else {
            "[MOVE]".green()
        };
        let mut line = format!("{} {}  →  {}/", action, name, category.dir_name());
        if let Some(new_name) = renamed_to {
            line.push_str(&format!(" (renamed to {})", new_name));
        }
        progress.suspend(|| OutputFormatter::plain(&line));
    }
}
