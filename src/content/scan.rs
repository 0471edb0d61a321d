//! Directory discovery and slug resolution
//!
//! Listings are sorted by file name so that repeated runs discover content in
//! the same order. Callers still apply their own ordering on top.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::{BuildError, Result};

/// Immediate subdirectories of `root`
pub fn directories(root: &Path) -> Result<Vec<PathBuf>> {
    walk(root, Some(1), |entry| entry.file_type().is_dir())
}

/// Files directly inside `root` accepted by `filter`
pub fn files<F>(root: &Path, filter: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    walk(root, Some(1), |entry| {
        entry.file_type().is_file() && filter(entry.path())
    })
}

/// Files anywhere below `root` accepted by `filter`
pub fn files_deep<F>(root: &Path, filter: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    walk(root, None, |entry| {
        entry.file_type().is_file() && filter(entry.path())
    })
}

fn walk<F>(root: &Path, max_depth: Option<usize>, keep: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&DirEntry) -> bool,
{
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    let mut result = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if keep(&entry) {
            result.push(entry.into_path());
        }
    }
    Ok(result)
}

fn walk_error(root: &Path, err: walkdir::Error) -> BuildError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
    BuildError::io(path, source)
}

/// Whether `path` is a Markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

/// Whether `path` is a course entry file (`index.md`)
pub fn is_index_file(path: &Path) -> bool {
    path.file_name().map(|n| n == "index.md").unwrap_or(false)
}

/// Whether `path` is a section file: Markdown, but not `index.md`
pub fn is_section_file(path: &Path) -> bool {
    is_markdown_file(path) && !is_index_file(path)
}

/// Name of the directory that contains `path`
pub fn dir_slug(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name of `path` up to its first `.`
pub fn file_slug(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("rust/assets")).unwrap();
        fs::create_dir_all(root.join("go")).unwrap();
        fs::write(root.join("rust/index.md"), "x").unwrap();
        fs::write(root.join("rust/intro.md"), "x").unwrap();
        fs::write(root.join("rust/assets/notes.md"), "x").unwrap();
        fs::write(root.join("rust/cover.png"), "x").unwrap();
        fs::write(root.join("go/index.md"), "x").unwrap();
        fs::write(root.join("README.txt"), "x").unwrap();
        dir
    }

    fn names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_directories_are_shallow_and_sorted() {
        let dir = tree();
        let dirs = directories(dir.path()).unwrap();
        assert_eq!(names(dir.path(), &dirs), vec!["go", "rust"]);
    }

    #[test]
    fn test_files_shallow() {
        let dir = tree();
        let root = dir.path().join("rust");
        let found = files(&root, is_section_file).unwrap();
        assert_eq!(names(&root, &found), vec!["intro.md"]);
    }

    #[test]
    fn test_files_deep() {
        let dir = tree();
        let found = files_deep(dir.path(), is_index_file).unwrap();
        assert_eq!(names(dir.path(), &found), vec!["go/index.md", "rust/index.md"]);

        let sections = files_deep(dir.path(), is_section_file).unwrap();
        assert_eq!(
            names(dir.path(), &sections),
            vec!["rust/assets/notes.md", "rust/intro.md"]
        );
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = directories(&missing).unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
        assert_eq!(err.path(), Some(missing.as_path()));
    }

    #[test]
    fn test_slugs() {
        assert_eq!(dir_slug(Path::new("course/rust-basics/index.md")), "rust-basics");
        assert_eq!(file_slug(Path::new("course/rust/01-intro.md")), "01-intro");
        assert_eq!(file_slug(Path::new("course/rust/setup.draft.md")), "setup");
        assert_eq!(file_slug(Path::new("course/rust/plain")), "plain");
    }
}
