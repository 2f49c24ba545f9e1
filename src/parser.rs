use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Parser turning Rust source into `syn` syntax trees.
///
/// The trees are what the [`DeclarationCollector`](crate::collector::DeclarationCollector)
/// walks to find types, their inherent operations and marker attributes.
///
/// # Example
///
/// ```no_run
/// use api_specifier::parser::AstParser;
/// use std::path::Path;
///
/// let parsed = AstParser::parse_file(Path::new("src/calc.rs")).unwrap();
/// println!("Parsed {} items", parsed.syntax_tree.items.len());
/// ```
pub struct AstParser;

/// A parsed Rust file.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the source file, or a display name for in-memory sources
    pub path: PathBuf,
    /// The parsed syntax tree
    pub syntax_tree: syn::File,
}

impl AstParser {
    /// Reads and parses a single Rust source file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid Rust.
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Self::parse_source(path, &content)
    }

    /// Parses Rust source held in memory. `path` is only used for reporting.
    pub fn parse_source(path: impl AsRef<Path>, content: &str) -> Result<ParsedFile> {
        let path = path.as_ref();
        let syntax_tree = syn::parse_file(content)
            .with_context(|| format!("Failed to parse Rust syntax in file: {}", path.display()))?;

        debug!(
            "Parsed {} top-level items from {}",
            syntax_tree.items.len(),
            path.display()
        );

        Ok(ParsedFile {
            path: path.to_path_buf(),
            syntax_tree,
        })
    }

    /// Parses every file in `paths`, continuing past failures.
    ///
    /// Failures are logged as warnings and returned in place, so markers can
    /// still be collected from the files that did parse.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<ParsedFile>> {
        debug!("Parsing {} files", paths.len());

        let results: Vec<Result<ParsedFile>> = paths
            .iter()
            .map(|path| {
                Self::parse_file(path).inspect_err(|e| {
                    warn!("Failed to parse {}: {:#}", path.display(), e);
                })
            })
            .collect();

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        debug!(
            "Parsing complete: {} succeeded, {} failed",
            success_count,
            results.len() - success_count
        );

        results
    }
}
