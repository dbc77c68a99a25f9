use std::ffi::OsString;
/// Integration tests for tidyshelf
///
/// These tests run complete organization passes against temporary
/// directories, covering:
/// 1. Basic organization and category layout
/// 2. Collision renaming
/// 3. Dry-run fidelity
/// 4. Exclusion rules (directories, self executable, filters)
/// 5. Edge cases and error scenarios
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

use tidyshelf::category::Category;
use tidyshelf::config::{
    CONFIG_FILE_NAME, CompiledFilters, ExcludeRules, FilterConfig, FilterRules, IncludeRules,
};
use tidyshelf::organizer::{OrganizeError, OrganizeOptions, Organizer};

// ============================================================================
// Test Utilities
// ============================================================================

/// A test fixture that sets up a temporary directory with a configurable
/// file structure.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with a temporary directory.
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    /// Get the path to the test directory.
    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file with content in the test directory.
    fn create_file(&self, name: &str, content: &str) {
        let file_path = self.path().join(name);
        let mut file = File::create(&file_path).expect("Failed to create file");
        file.write_all(content.as_bytes())
            .expect("Failed to write file content");
    }

    /// Create multiple files at once.
    fn create_files(&self, names: &[&str]) {
        for name in names {
            self.create_file(name, "content");
        }
    }

    /// Create a subdirectory in the test directory.
    fn create_subdir(&self, name: &str) {
        let dir_path = self.path().join(name);
        fs::create_dir(&dir_path).expect("Failed to create subdirectory");
    }

    /// Assert that a directory exists at the given relative path.
    fn assert_dir_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_dir(),
            "Directory should exist: {}",
            path.display()
        );
    }

    /// Assert that a file exists at the given relative path.
    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_file(),
            "File should exist: {}",
            path.display()
        );
    }

    /// Assert that nothing exists at the given relative path.
    fn assert_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "Path should not exist: {}", path.display());
    }

    /// Count directories in the test directory (non-recursive).
    fn count_dirs(&self) -> usize {
        fs::read_dir(self.path())
            .expect("Failed to read directory")
            .filter_map(|entry| {
                entry.ok().and_then(|e| {
                    if e.metadata().ok()?.is_dir() {
                        Some(())
                    } else {
                        None
                    }
                })
            })
            .count()
    }

    /// Count regular files at the top level (non-recursive).
    fn count_top_level_files(&self) -> usize {
        fs::read_dir(self.path())
            .expect("Failed to read directory")
            .filter_map(|entry| {
                entry.ok().and_then(|e| {
                    if e.metadata().ok()?.is_file() {
                        Some(())
                    } else {
                        None
                    }
                })
            })
            .count()
    }
}

/// Compile a custom filter rule set for a pass.
fn compile_filters(rules: FilterRules) -> CompiledFilters {
    FilterConfig { filters: rules }
        .compile()
        .expect("Failed to compile filters")
}

// ============================================================================
// Test Suite 1: Basic Organization
// ============================================================================

#[test]
fn test_organize_empty_directory() {
    let fixture = TestFixture::new();

    let summary = Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Should succeed on empty directory");

    assert!(summary.is_empty());
    assert_eq!(summary.total(), 0);
    assert_eq!(fixture.count_dirs(), 0, "Should create no subdirectories");
}

#[test]
fn test_organize_concrete_scenario() {
    // photo.png, notes.txt, archive.zip, a subfolder, and the tool's own
    // binary: three files shelved, the rest untouched.
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.png", "notes.txt", "archive.zip", "tidyshelf"]);
    fixture.create_subdir("sub");

    let options = OrganizeOptions {
        dry_run: false,
        self_name: Some(OsString::from("tidyshelf")),
        filters: CompiledFilters::default(),
    };
    let summary = Organizer::organize(fixture.path(), &options).expect("Failed to organize");

    fixture.assert_file_exists("Images/photo.png");
    fixture.assert_file_exists("Documents/notes.txt");
    fixture.assert_file_exists("Archives/archive.zip");
    fixture.assert_dir_exists("sub");
    fixture.assert_file_exists("tidyshelf");
    fixture.assert_not_exists("photo.png");

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.category_counts().len(), 3);
    assert_eq!(summary.files_for(Category::Images), ["photo.png"]);
    assert_eq!(summary.files_for(Category::Documents), ["notes.txt"]);
    assert_eq!(summary.files_for(Category::Archives), ["archive.zip"]);
}

#[test]
fn test_unknown_and_missing_extensions_go_to_misc() {
    let fixture = TestFixture::new();
    fixture.create_files(&["data.xyz", "README"]);

    Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    fixture.assert_file_exists("Misc/data.xyz");
    fixture.assert_file_exists("Misc/README");
}

#[test]
fn test_extension_case_is_ignored() {
    let fixture = TestFixture::new();
    fixture.create_files(&["PHOTO.JPG", "Track.Mp3"]);

    Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    fixture.assert_file_exists("Images/PHOTO.JPG");
    fixture.assert_file_exists("Audio/Track.Mp3");
}

#[test]
fn test_compound_extension_uses_last_segment() {
    let fixture = TestFixture::new();
    fixture.create_file("backup.tar.gz", "content");

    Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    fixture.assert_file_exists("Archives/backup.tar.gz");
}

#[test]
fn test_subdirectories_are_never_moved() {
    let fixture = TestFixture::new();
    fixture.create_subdir("projects");
    fixture.create_subdir("Images");
    fixture.create_file("photo.png", "content");

    let summary = Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    fixture.assert_dir_exists("projects");
    fixture.assert_file_exists("Images/photo.png");
    assert_eq!(summary.total(), 1, "Only the file should be recorded");
}

#[test]
fn test_summary_records_names_in_sorted_order() {
    let fixture = TestFixture::new();
    fixture.create_files(&["c.txt", "a.txt", "b.txt"]);

    let summary = Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    assert_eq!(
        summary.files_for(Category::Documents),
        ["a.txt", "b.txt", "c.txt"]
    );
}

// ============================================================================
// Test Suite 2: Collision Renaming
// ============================================================================

#[test]
fn test_collision_appends_numeric_suffix() {
    let fixture = TestFixture::new();
    fixture.create_subdir("Documents");
    fixture.create_file("Documents/a.txt", "already shelved");
    fixture.create_file("a.txt", "incoming");

    Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    fixture.assert_file_exists("Documents/a.txt");
    fixture.assert_file_exists("Documents/a_1.txt");
    fixture.assert_not_exists("a.txt");

    // A later collider with the same name takes the next counter.
    fixture.create_file("a.txt", "incoming again");
    Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    fixture.assert_file_exists("Documents/a_2.txt");
}

#[test]
fn test_collision_without_extension() {
    let fixture = TestFixture::new();
    fixture.create_subdir("Misc");
    fixture.create_file("Misc/README", "already shelved");
    fixture.create_file("README", "incoming");

    Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    fixture.assert_file_exists("Misc/README_1");
}

#[test]
fn test_collision_preserves_contents() {
    let fixture = TestFixture::new();
    fixture.create_subdir("Documents");
    fixture.create_file("Documents/a.txt", "already shelved");
    fixture.create_file("a.txt", "incoming");

    Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    let shelved = fs::read_to_string(fixture.path().join("Documents/a.txt"))
        .expect("Failed to read file");
    let renamed = fs::read_to_string(fixture.path().join("Documents/a_1.txt"))
        .expect("Failed to read file");
    assert_eq!(shelved, "already shelved");
    assert_eq!(renamed, "incoming");
}

// ============================================================================
// Test Suite 3: Dry-Run Fidelity
// ============================================================================

#[test]
fn test_dry_run_moves_nothing() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.png", "notes.txt"]);

    let summary = Organizer::organize(fixture.path(), &OrganizeOptions::new(true))
        .expect("Failed to organize");

    assert_eq!(summary.total(), 2);
    assert_eq!(fixture.count_dirs(), 0, "No directories should be created");
    fixture.assert_file_exists("photo.png");
    fixture.assert_file_exists("notes.txt");
}

#[test]
fn test_dry_run_summary_matches_real_run() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.png", "clip.mp4", "notes.txt", "extra.txt"]);
    fixture.create_subdir("sub");

    let preview = Organizer::organize(fixture.path(), &OrganizeOptions::new(true))
        .expect("Failed to preview");
    let real = Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    assert_eq!(preview.total(), real.total());
    assert_eq!(preview.category_counts(), real.category_counts());
    assert_eq!(
        preview.files_for(Category::Documents),
        real.files_for(Category::Documents)
    );
}

#[test]
fn test_rerun_on_organized_tree_moves_nothing() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.png", "notes.txt"]);

    Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");
    let second = Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to re-organize");

    // Shelved files now live one level deeper and are not re-scanned.
    assert!(second.is_empty());
    fixture.assert_file_exists("Images/photo.png");
    fixture.assert_file_exists("Documents/notes.txt");
    assert_eq!(fixture.count_top_level_files(), 0);
}

// ============================================================================
// Test Suite 4: Exclusion Rules
// ============================================================================

#[test]
fn test_self_executable_is_skipped() {
    let fixture = TestFixture::new();
    fixture.create_file("tidyshelf", "binary");

    let options = OrganizeOptions {
        dry_run: false,
        self_name: Some(OsString::from("tidyshelf")),
        filters: CompiledFilters::default(),
    };
    let summary = Organizer::organize(fixture.path(), &options).expect("Failed to organize");

    assert!(summary.is_empty());
    fixture.assert_file_exists("tidyshelf");
    fixture.assert_not_exists("Misc");
}

#[test]
fn test_own_config_file_is_not_shelved() {
    let fixture = TestFixture::new();
    fixture.create_file(CONFIG_FILE_NAME, "[filters]\n");
    fixture.create_file("notes.txt", "content");

    let summary = Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    assert_eq!(summary.total(), 1);
    fixture.assert_file_exists(CONFIG_FILE_NAME);
    fixture.assert_file_exists("Documents/notes.txt");
}

#[test]
fn test_hidden_files_shelve_to_misc_by_default() {
    let fixture = TestFixture::new();
    fixture.create_file(".envrc", "content");

    Organizer::organize(fixture.path(), &OrganizeOptions::new(false))
        .expect("Failed to organize");

    fixture.assert_file_exists("Misc/.envrc");
}

#[test]
fn test_skip_hidden_leaves_dotfiles_in_place() {
    let fixture = TestFixture::new();
    fixture.create_file(".envrc", "content");
    fixture.create_file("notes.txt", "content");

    let options = OrganizeOptions {
        dry_run: false,
        self_name: None,
        filters: compile_filters(FilterRules {
            skip_hidden: true,
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        }),
    };
    let summary = Organizer::organize(fixture.path(), &options).expect("Failed to organize");

    assert_eq!(summary.total(), 1);
    fixture.assert_file_exists(".envrc");
    fixture.assert_file_exists("Documents/notes.txt");
}

#[test]
fn test_exclude_by_exact_name() {
    let fixture = TestFixture::new();
    fixture.create_files(&["keep.txt", "move.txt"]);

    let options = OrganizeOptions {
        dry_run: false,
        self_name: None,
        filters: compile_filters(FilterRules {
            skip_hidden: false,
            exclude: ExcludeRules {
                names: vec!["keep.txt".to_string()],
                ..Default::default()
            },
            include: IncludeRules::default(),
        }),
    };
    Organizer::organize(fixture.path(), &options).expect("Failed to organize");

    fixture.assert_file_exists("keep.txt");
    fixture.assert_file_exists("Documents/move.txt");
}

#[test]
fn test_include_glob_overrides_exclude() {
    let fixture = TestFixture::new();
    fixture.create_files(&["important.txt", "other.txt"]);

    let options = OrganizeOptions {
        dry_run: false,
        self_name: None,
        filters: compile_filters(FilterRules {
            skip_hidden: false,
            exclude: ExcludeRules {
                globs: vec!["*.txt".to_string()],
                ..Default::default()
            },
            include: IncludeRules {
                globs: vec!["*important*".to_string()],
            },
        }),
    };
    let summary = Organizer::organize(fixture.path(), &options).expect("Failed to organize");

    assert_eq!(summary.total(), 1);
    fixture.assert_file_exists("Documents/important.txt");
    fixture.assert_file_exists("other.txt");
}

// ============================================================================
// Test Suite 5: Error Scenarios
// ============================================================================

#[test]
fn test_missing_target_is_invalid() {
    let fixture = TestFixture::new();
    let missing = fixture.path().join("missing");

    let result = Organizer::organize(&missing, &OrganizeOptions::new(false));
    assert!(matches!(result, Err(OrganizeError::InvalidTarget { .. })));
}

#[test]
fn test_file_target_is_invalid() {
    let fixture = TestFixture::new();
    fixture.create_file("plain.txt", "content");

    let result = Organizer::organize(
        &fixture.path().join("plain.txt"),
        &OrganizeOptions::new(false),
    );
    assert!(matches!(result, Err(OrganizeError::InvalidTarget { .. })));
}

#[test]
fn test_error_messages_are_printable() {
    let result = Organizer::organize(Path::new("/no/such/dir"), &OrganizeOptions::new(false));
    let message = result.expect_err("Should fail").to_string();
    assert!(message.contains("is not a valid directory"));
}
