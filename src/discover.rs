//! Markdown file discovery.

use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum DiscoverError {
    #[error("content root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("content root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Find all markdown files under `root`.
///
/// Skips hidden directories and any directory whose name is in `exclude`
/// (the generator's build output and its dependency tree by default).
/// Paths come back sorted so documents are processed in a stable order.
pub fn find_markdown_files(
    root: &Path,
    exclude: &[String],
) -> Result<Vec<PathBuf>, DiscoverError> {
    if !root.exists() {
        return Err(DiscoverError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoverError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    walk_directory(root, exclude, &mut files)?;
    files.sort();
    Ok(files)
}

/// Recursively walk a directory and collect markdown files.
fn walk_directory(
    dir: &Path,
    exclude: &[String],
    files: &mut Vec<PathBuf>,
) -> Result<(), DiscoverError> {
    let entries = std::fs::read_dir(dir).map_err(|e| DiscoverError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| DiscoverError::ReadEntry {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        let file_name = entry.file_name();
        let file_name_str = file_name.to_string_lossy();

        // Skip hidden files and directories
        if file_name_str.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            if exclude.iter().any(|name| name == file_name_str.as_ref()) {
                continue;
            }
            walk_directory(&path, exclude, files)?;
        } else if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("md") {
            files.push(path);
        }
    }

    Ok(())
}
