use crate::errors::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// The candidates found by a scan, in traversal order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathSet {
    /// Files, directories and links selected by the scan.
    pub all_matches: Vec<PathBuf>,
    /// The regular files among `all_matches` that pass the extension filter.
    pub files_only: Vec<PathBuf>,
    /// Hidden directories whose subtrees were not visited.
    pub hidden_dirs: Vec<PathBuf>,
}

/// Which entries a scan selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Only entries whose base name contains the pattern.
    NameContains(&'a str),
    /// Every non-hidden entry. Renaming still checks the base name, but file
    /// contents are searched in every file.
    Everything,
}

/// Walks `root` and collects every non-hidden entry whose base name contains
/// `pattern`.
///
/// Entries are visited in lexical order with parents before their children.
/// The root itself is never a candidate. Hidden entries (leading `.`) are
/// skipped, and hidden directories are not descended into.
pub fn scan(root: &Path, pattern: &str, extension: Option<&str>) -> Result<PathSet> {
    scan_with(root, Selection::NameContains(pattern), extension)
}

/// Like [`scan`], with an explicit [`Selection`].
pub fn scan_with(root: &Path, selection: Selection<'_>, extension: Option<&str>) -> Result<PathSet> {
    match fs::metadata(root) {
        Ok(metadata) if !metadata.is_dir() => return Err(Error::NotADirectory(root.to_path_buf())),
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::RootNotFound(root.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    }

    let mut paths = PathSet::default();
    let mut hidden_dirs = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !is_hidden(entry) {
                return true;
            }
            if entry.file_type().is_dir() {
                hidden_dirs.push(entry.path().to_path_buf());
            }
            false
        });

    for entry in walker {
        let entry = entry?;
        if let Selection::NameContains(pattern) = selection {
            let Some(name) = entry.file_name().to_str() else {
                log::warn!("Skipping non UTF-8 name: {}", entry.path().display());
                continue;
            };
            if !name.contains(pattern) {
                continue;
            }
        }

        let path = entry.path();
        if entry.file_type().is_file() && matches_extension(path, extension) {
            paths.files_only.push(path.to_path_buf());
        }
        log::debug!("Selected {}", path.display());
        paths.all_matches.push(path.to_path_buf());
    }

    paths.hidden_dirs = hidden_dirs;
    Ok(paths)
}

/// A leading `.` byte marks an entry hidden, whatever the rest of the name.
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .as_encoded_bytes()
        .starts_with(b".")
}

/// The extension of `path` with its leading dot, or `""` when it has none.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// `true` when no filter is set or the path's extension equals it exactly.
pub fn matches_extension(path: &Path, extension: Option<&str>) -> bool {
    match extension {
        None => true,
        Some(wanted) => dotted_extension(path) == wanted,
    }
}
