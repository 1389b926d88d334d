//! Recursive filesystem scans for the pipeline.

use std::io;
use std::path::{Path, PathBuf};

/// Recursively collect every regular file under `root`.
///
/// Enumeration order follows the filesystem and must not be assumed stable.
pub(crate) async fn collect_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push(entry.path());
            } else if file_type.is_file() {
                files.push(entry.path());
            }
        }
    }

    Ok(files)
}

/// Recursively collect files under `root` whose extension matches
/// `extension` (bare, case-insensitive).
pub(crate) async fn discover_archives(root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let wanted = extension.to_ascii_lowercase();
    let files = collect_files(root).await?;
    Ok(files
        .into_iter()
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(&wanted))
                .unwrap_or(false)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.unwrap();
        }
        tokio::fs::write(path, b"").await.unwrap();
    }

    #[tokio::test]
    async fn test_collect_files_recurses() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.zip")).await;
        touch(&temp.path().join("nested/deep/b.zip")).await;
        touch(&temp.path().join("nested/readme.txt")).await;

        let mut files = collect_files(temp.path()).await.unwrap();
        files.sort();
        assert_eq!(files.len(), 3);
    }

    #[tokio::test]
    async fn test_discover_archives_filters_case_insensitively() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.zip")).await;
        touch(&temp.path().join("b.ZIP")).await;
        touch(&temp.path().join("c.tar")).await;
        touch(&temp.path().join("noext")).await;

        let archives = discover_archives(temp.path(), "zip").await.unwrap();
        assert_eq!(archives.len(), 2);
    }

    #[tokio::test]
    async fn test_discover_archives_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = discover_archives(&temp.path().join("absent"), "zip").await;
        assert!(result.is_err());
    }
}
