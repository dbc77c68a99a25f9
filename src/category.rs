/// Extension-based file classification.
///
/// This module maps file extensions to the fixed set of shelf categories
/// used to name destination subdirectories.
///
/// # Examples
///
/// ```
/// use tidyshelf::category::{Category, ExtensionMap};
///
/// let map = ExtensionMap::default();
/// assert_eq!(map.category_for("png"), Category::Images);
/// assert_eq!(map.category_for(".MP3"), Category::Audio);
/// assert_eq!(map.category_for("xyz"), Category::Misc);
/// ```
use std::collections::HashMap;
use std::path::Path;

/// Represents a shelf category.
///
/// Each category corresponds to one destination subdirectory inside the
/// organized target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Image files (PNG, JPG, SVG, etc.)
    Images,
    /// Video files (MP4, MKV, MOV, etc.)
    Videos,
    /// Audio files (MP3, FLAC, WAV, etc.)
    Audio,
    /// Document files (PDF, DOCX, TXT, etc.)
    Documents,
    /// Archive files (ZIP, TAR, 7Z, etc.)
    Archives,
    /// Source code and markup files (PY, JS, HTML, etc.)
    Code,
    /// Installers and executables (EXE, DEB, DMG, etc.)
    Executables,
    /// Font files (TTF, OTF, WOFF, etc.)
    Fonts,
    /// Everything without a recognized extension.
    Misc,
}

impl Category {
    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidyshelf::category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Misc.dir_name(), "Misc");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Audio => "Audio",
            Category::Documents => "Documents",
            Category::Archives => "Archives",
            Category::Code => "Code",
            Category::Executables => "Executables",
            Category::Fonts => "Fonts",
            Category::Misc => "Misc",
        }
    }
}

/// Maps file extensions to categories.
///
/// The table is fixed at construction and lookups are case-insensitive.
/// A leading dot on the queried extension is tolerated, so `".jpg"` and
/// `"jpg"` resolve identically.
#[derive(Debug, Clone)]
pub struct ExtensionMap {
    extensions: HashMap<String, Category>,
}

impl ExtensionMap {
    /// Creates a new `ExtensionMap` with all standard mappings.
    pub fn new() -> Self {
        let mut map = Self {
            extensions: HashMap::new(),
        };
        map.populate_standard_mappings();
        map
    }

    /// Populates the map with the standard extension table.
    fn populate_standard_mappings(&mut self) {
        // Image extensions
        self.add_mapping("jpg", Category::Images);
        self.add_mapping("jpeg", Category::Images);
        self.add_mapping("png", Category::Images);
        self.add_mapping("gif", Category::Images);
        self.add_mapping("bmp", Category::Images);
        self.add_mapping("svg", Category::Images);
        self.add_mapping("webp", Category::Images);
        self.add_mapping("ico", Category::Images);
        self.add_mapping("tiff", Category::Images);

        // Video extensions
        self.add_mapping("mp4", Category::Videos);
        self.add_mapping("mov", Category::Videos);
        self.add_mapping("avi", Category::Videos);
        self.add_mapping("mkv", Category::Videos);
        self.add_mapping("wmv", Category::Videos);
        self.add_mapping("flv", Category::Videos);
        self.add_mapping("webm", Category::Videos);
        self.add_mapping("m4v", Category::Videos);

        // Audio extensions
        self.add_mapping("mp3", Category::Audio);
        self.add_mapping("wav", Category::Audio);
        self.add_mapping("aac", Category::Audio);
        self.add_mapping("flac", Category::Audio);
        self.add_mapping("ogg", Category::Audio);
        self.add_mapping("m4a", Category::Audio);
        self.add_mapping("wma", Category::Audio);

        // Document extensions
        self.add_mapping("pdf", Category::Documents);
        self.add_mapping("doc", Category::Documents);
        self.add_mapping("docx", Category::Documents);
        self.add_mapping("xls", Category::Documents);
        self.add_mapping("xlsx", Category::Documents);
        self.add_mapping("ppt", Category::Documents);
        self.add_mapping("pptx", Category::Documents);
        self.add_mapping("txt", Category::Documents);
        self.add_mapping("md", Category::Documents);
        self.add_mapping("csv", Category::Documents);
        self.add_mapping("odt", Category::Documents);

        // Archive extensions
        self.add_mapping("zip", Category::Archives);
        self.add_mapping("tar", Category::Archives);
        self.add_mapping("gz", Category::Archives);
        self.add_mapping("rar", Category::Archives);
        self.add_mapping("7z", Category::Archives);
        self.add_mapping("bz2", Category::Archives);

        // Code extensions
        self.add_mapping("py", Category::Code);
        self.add_mapping("js", Category::Code);
        self.add_mapping("ts", Category::Code);
        self.add_mapping("html", Category::Code);
        self.add_mapping("css", Category::Code);
        self.add_mapping("java", Category::Code);
        self.add_mapping("cpp", Category::Code);
        self.add_mapping("c", Category::Code);
        self.add_mapping("h", Category::Code);
        self.add_mapping("json", Category::Code);
        self.add_mapping("xml", Category::Code);
        self.add_mapping("yaml", Category::Code);
        self.add_mapping("yml", Category::Code);
        self.add_mapping("sh", Category::Code);
        self.add_mapping("sql", Category::Code);

        // Executable extensions
        self.add_mapping("exe", Category::Executables);
        self.add_mapping("msi", Category::Executables);
        self.add_mapping("dmg", Category::Executables);
        self.add_mapping("pkg", Category::Executables);
        self.add_mapping("deb", Category::Executables);
        self.add_mapping("rpm", Category::Executables);
        self.add_mapping("app", Category::Executables);

        // Font extensions
        self.add_mapping("ttf", Category::Fonts);
        self.add_mapping("otf", Category::Fonts);
        self.add_mapping("woff", Category::Fonts);
        self.add_mapping("woff2", Category::Fonts);
    }

    /// Adds an extension to category mapping.
    pub fn add_mapping(&mut self, ext: &str, category: Category) {
        self.extensions
            .insert(Self::normalize(ext), category);
    }

    /// Resolves an extension to its category.
    ///
    /// Total over all strings: unknown extensions resolve to
    /// `Category::Misc`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidyshelf::category::{Category, ExtensionMap};
    ///
    /// let map = ExtensionMap::default();
    /// assert_eq!(map.category_for("pdf"), Category::Documents);
    /// assert_eq!(map.category_for(".JPG"), Category::Images);
    /// assert_eq!(map.category_for(""), Category::Misc);
    /// ```
    pub fn category_for(&self, ext: &str) -> Category {
        self.extensions
            .get(&Self::normalize(ext))
            .copied()
            .unwrap_or(Category::Misc)
    }

    /// Resolves a path to its category via the path's extension.
    ///
    /// Paths without an extension (including dotfiles like `.gitignore`)
    /// resolve to `Category::Misc`.
    pub fn category_for_path(&self, path: &Path) -> Category {
        match path.extension() {
            Some(ext) => self.category_for(&ext.to_string_lossy()),
            None => Category::Misc,
        }
    }

    fn normalize(ext: &str) -> String {
        ext.trim_start_matches('.').to_lowercase()
    }
}

impl Default for ExtensionMap {
    fn default() -> Self {
        Self::new()
    }
}
