//! Output file writer
//!
//! Each collection is written to `<output_dir>/<collection>.json`. Existing
//! files are overwritten without confirmation.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BackupError, Result};
use crate::utils::path::resolve;

/// Writer for per-collection JSON files
#[derive(Debug, Clone)]
pub struct JsonFileWriter {
    /// Directory the files are written to
    output_dir: PathBuf,
}

impl JsonFileWriter {
    /// Create a new writer
    ///
    /// # Arguments
    /// * `output_dir` - Existing directory for output files
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the given collection is written to, relative to the output dir
    pub fn output_path(&self, collection: &str) -> PathBuf {
        self.output_dir.join(format!("{collection}.json"))
    }

    /// Write a collection's serialized export
    ///
    /// # Arguments
    /// * `collection` - Collection id
    /// * `contents` - Serialized JSON
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Absolute path of the written file
    pub async fn write(&self, collection: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.output_path(collection);

        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| BackupError::Write {
                path: path.clone(),
                source,
            })?;

        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(absolute(&path))
    }
}

/// Resolve against the current working directory
///
/// Falls back to the path as given when the working directory is unknown.
fn absolute(path: &Path) -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => resolve(&cwd, path),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonFileWriter::new(dir.path());

        let path = writer.write("users", b"[]").await.unwrap();

        assert_eq!(path, dir.path().join("users.json"));
        assert!(path.is_absolute());
        assert_eq!(std::fs::read(&path).unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("users.json"), "old contents that are longer").unwrap();

        let writer = JsonFileWriter::new(dir.path());
        let path = writer.write("users", b"new").await.unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonFileWriter::new(dir.path().join("missing"));

        let err = writer.write("users", b"[]").await.unwrap_err();
        assert!(matches!(err, BackupError::Write { .. }));
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_output_path() {
        let writer = JsonFileWriter::new(".");
        assert_eq!(writer.output_path("orders"), PathBuf::from("./orders.json"));
    }
}
