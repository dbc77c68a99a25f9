//! tidyshelf - shelve a directory's loose files by category
//!
//! This library classifies files by extension into fixed categories
//! (Images, Videos, Audio, Documents, Archives, Code, Executables, Fonts,
//! Misc), relocates them into matching subdirectories in a single sorted
//! pass, and supports a dry-run mode that reports intended moves without
//! performing them. File filtering rules can be supplied via TOML
//! configuration files.

pub mod category;
pub mod cli;
pub mod config;
pub mod organizer;
pub mod output;

pub use category::{Category, ExtensionMap};
pub use config::{CompiledFilters, ConfigError, FilterConfig};
pub use organizer::{MoveSummary, OrganizeError, OrganizeOptions, OrganizeResult, Organizer};

pub use cli::{Cli, run};
