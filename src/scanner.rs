use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Finds the Rust source files of a project.
///
/// Directories named `target` and hidden directories are skipped. Entries are
/// visited in file-name order so that operations merged from several files
/// keep a stable declaration order between runs.
///
/// # Example
///
/// ```no_run
/// use api_specifier::scanner::FileScanner;
/// use std::path::PathBuf;
///
/// let result = FileScanner::new(PathBuf::from("./my-project")).scan().unwrap();
/// println!("Found {} Rust files", result.source_files.len());
/// ```
pub struct FileScanner {
    root_path: PathBuf,
}

/// Files found by [`FileScanner::scan`].
pub struct ScanResult {
    /// `.rs` files in traversal order
    pub source_files: Vec<PathBuf>,
    /// Entries that could not be read
    pub warnings: Vec<String>,
}

impl FileScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Walks the tree below the root path and collects `.rs` files.
    ///
    /// Unreadable entries are recorded as warnings and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the root path itself cannot be read.
    pub fn scan(&self) -> Result<ScanResult> {
        std::fs::metadata(&self.root_path)
            .with_context(|| format!("Failed to access {}", self.root_path.display()))?;

        let mut source_files = Vec::new();
        let mut warnings = Vec::new();

        let walker = WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.path() == self.root_path || !is_skipped(e));

        for entry in walker {
            match entry {
                Ok(entry) if is_rust_file(entry.path()) => {
                    source_files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    debug!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        debug!(
            "Scanned {}: {} Rust files",
            self.root_path.display(),
            source_files.len()
        );

        Ok(ScanResult {
            source_files,
            warnings,
        })
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    let file_name = entry.file_name().to_string_lossy();
    file_name.starts_with('.') || (entry.file_type().is_dir() && file_name == "target")
}

fn is_rust_file(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("rs")
}
