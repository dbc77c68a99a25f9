//! File filtering configuration.
//!
//! Optional TOML configuration controlling which top-level files an
//! organization pass touches. Supports exact-name matching, glob pattern
//! matching, extension matching, regex rules, and an include (whitelist)
//! override. Defaults touch everything except the tool's own
//! configuration file.
//!
//! # Configuration File Format
//!
//! ```toml
//! [filters]
//! skip_hidden = false
//!
//! [filters.exclude]
//! names = [".DS_Store", "Thumbs.db"]
//! globs = ["*.part"]
//! extensions = ["tmp"]
//! regex = []
//!
//! [filters.include]
//! globs = []
//! ```

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const CONFIG_FILE_NAME: &str = ".tidyshelfrc.toml";

/// Errors that can occur while loading or compiling filter rules.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    NotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    Parse(String),
    /// Invalid glob pattern.
    BadGlob(String),
    /// Invalid regex pattern, with the compiler's reason.
    BadRegex { pattern: String, reason: String },
    /// IO error while reading the configuration file.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Parse(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::BadGlob(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::BadRegex { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Filter rules loaded from a TOML configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub filters: FilterRules,
}

/// Root-level filter rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRules {
    /// Skip files whose names start with a dot. Off by default: a hidden
    /// file classifies like any other (dotfiles carry no extension, so
    /// they land in Misc).
    #[serde(default)]
    pub skip_hidden: bool,

    /// Rules for leaving files in place.
    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Whitelist rules that override exclude rules.
    #[serde(default)]
    pub include: IncludeRules,
}

/// Rules for excluding files from the pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact file names to leave in place.
    #[serde(default = "default_excluded_names")]
    pub names: Vec<String>,

    /// Glob patterns to leave in place (e.g. "*.part").
    #[serde(default)]
    pub globs: Vec<String>,

    /// File extensions to leave in place (e.g. "tmp").
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regex rules matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl Default for ExcludeRules {
    fn default() -> Self {
        Self {
            names: default_excluded_names(),
            globs: Vec::new(),
            extensions: Vec::new(),
            regex: Vec::new(),
        }
    }
}

/// The tool never shelves its own configuration file.
fn default_excluded_names() -> Vec<String> {
    vec![CONFIG_FILE_NAME.to_string()]
}

/// Whitelist rules, overriding exclude rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    /// Glob patterns that override exclude rules.
    #[serde(default)]
    pub globs: Vec<String>,
}

impl FilterConfig {
    /// Load configuration with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. `.tidyshelfrc.toml` in the current directory
    /// 3. `~/.config/tidyshelf/config.toml`
    /// 4. Built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly provided configuration file
    /// cannot be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("tidyshelf")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Compile the rules into matcher structures for the pass.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex patterns are invalid.
    pub fn compile(self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(self.filters)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filters: FilterRules {
                skip_hidden: false,
                exclude: ExcludeRules::default(),
                include: IncludeRules::default(),
            },
        }
    }
}

/// Compiled filter rules, validated and ready for matching.
///
/// Glob and regex patterns are compiled once here so that matching during
/// the pass is a set lookup plus a scan over the compiled patterns.
pub struct CompiledFilters {
    skip_hidden: bool,
    excluded_names: HashSet<String>,
    excluded_extensions: HashSet<String>,
    exclude_globs: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_globs: Vec<Pattern>,
}

impl CompiledFilters {
    fn new(rules: FilterRules) -> Result<Self, ConfigError> {
        let exclude_globs = Self::compile_globs(&rules.exclude.globs)?;
        let include_globs = Self::compile_globs(&rules.include.globs)?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::BadRegex {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skip_hidden: rules.skip_hidden,
            excluded_names: rules.exclude.names.into_iter().collect(),
            excluded_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            exclude_globs,
            exclude_regexes,
            include_globs,
        })
    }

    fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
        patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::BadGlob(pattern.clone()))
            })
            .collect()
    }

    /// Check whether a file should be touched by the pass.
    ///
    /// Checks run in this order, with early termination:
    /// 1. Include globs (whitelist), always touched on match
    /// 2. Hidden-file skip, when enabled
    /// 3. Exact name match
    /// 4. Extension match (case-insensitive)
    /// 5. Exclude globs
    /// 6. Regex rules against the file name
    /// 7. Touched by default
    pub fn should_include(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self
            .include_globs
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
        {
            return true;
        }

        if self.skip_hidden && file_name.starts_with('.') {
            return false;
        }

        if self.excluded_names.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = file_path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.excluded_extensions.contains(&ext_lower) {
                return false;
            }
        }

        if self
            .exclude_globs
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
        {
            return false;
        }

        if self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(&file_name))
        {
            return false;
        }

        true
    }
}

impl Default for CompiledFilters {
    fn default() -> Self {
        Self {
            skip_hidden: false,
            excluded_names: default_excluded_names().into_iter().collect(),
            excluded_extensions: HashSet::new(),
            exclude_globs: Vec::new(),
            exclude_regexes: Vec::new(),
            include_globs: Vec::new(),
        }
    }
}
