//! File discovery: the extract half of the pipeline.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{EtlError, EtlResult};

/// Whether `path` carries exactly the given extension (no leading dot).
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy() == extension)
}

/// Recursively collect the files under `root` with the given extension.
///
/// Paths are absolute. Entries are visited in file-name order at every
/// directory level, so the result is stable between runs. Empty
/// subdirectories are skipped; a missing or unreadable `root` is an error.
pub fn discover_files(root: &Path, extension: &str) -> EtlResult<Vec<PathBuf>> {
    let root = root.canonicalize().map_err(|source| EtlError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        // `Path::is_file` follows a symlinked data file; the walk itself
        // still does not descend through linked directories.
        if !entry.path().is_file() || !has_extension(entry.path(), extension) {
            continue;
        }
        files.push(entry.into_path());
    }

    log::debug!(
        "Discovered {} .{} files under {}",
        files.len(),
        extension,
        root.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("/data/a.json"), "json"));
        assert!(!has_extension(Path::new("/data/a.JSON"), "json"));
        assert!(!has_extension(Path::new("/data/a.jsonl"), "json"));
        assert!(!has_extension(Path::new("/data/json"), "json"));
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("A/B/C")).unwrap();

        let files = discover_files(temp_dir.path(), "json").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_nested_files_are_found_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b/x")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/x/2.json"), "{}").unwrap();
        fs::write(root.join("b/1.json"), "{}").unwrap();
        fs::write(root.join("a/3.json"), "{}").unwrap();
        fs::write(root.join("a/notes.txt"), "skip").unwrap();

        let files = discover_files(root, "json").unwrap();
        let root = root.canonicalize().unwrap();
        let relative: Vec<PathBuf> = files
            .iter()
            .map(|f| f.strip_prefix(&root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("a/3.json"),
                PathBuf::from("b/1.json"),
                PathBuf::from("b/x/2.json"),
            ]
        );
        assert!(files.iter().all(|f| f.is_absolute()));
    }

    #[test]
    fn test_directory_named_like_a_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("dir.json")).unwrap();

        let files = discover_files(temp_dir.path(), "json").unwrap();
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_found() {
        let source_dir = TempDir::new().unwrap();
        let target = source_dir.path().join("x.json");
        fs::write(&target, "{}").unwrap();

        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("link.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let files = discover_files(temp_dir.path(), "json").unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("link.json"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = discover_files(&temp_dir.path().join("missing"), "json");
        assert!(matches!(result, Err(EtlError::Io { .. })));
    }
}
