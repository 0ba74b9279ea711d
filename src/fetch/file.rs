//! Local filesystem source

use std::future::Future;
use std::path::PathBuf;

use super::LogSource;
use crate::{Error, Result};

/// Reads logs relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Resolve paths against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve paths against the working directory.
    #[must_use]
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// Full path for a resource.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl LogSource for FileSource {
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String>> + Send {
        let full = self.resolve(path);
        let path = path.to_string();
        async move {
            tokio::fs::read_to_string(&full)
                .await
                .map_err(|e| Error::Fetch {
                    path,
                    reason: format!("{}: {e}", full.display()),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test3.log"), "epoch is 0\n").unwrap();

        let source = FileSource::new(dir.path());
        let text = source.fetch("test3.log").await.unwrap();
        assert_eq!(text, "epoch is 0\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path());
        let err = source.fetch("absent.log").await.unwrap_err();
        assert!(matches!(err, Error::Fetch { ref path, .. } if path == "absent.log"));
    }
}
