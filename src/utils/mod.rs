//! Utility functions and helpers for firestore-backup
//!
//! This module provides common utility functions used throughout the application:
//! - Document path handling
//! - Time and size formatting for log output
//! - Validation functions

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Document path utilities
pub mod path {
    use super::*;

    /// Final segment of a slash-separated document path
    ///
    /// # Arguments
    /// * `path` - Document path or full resource name
    ///
    /// # Returns
    /// * `&str` - Document identifier
    pub fn document_id(path: &str) -> &str {
        path.rsplit('/').next().unwrap_or(path)
    }

    /// Resolve a path against a base directory and drop `.` components
    ///
    /// `..` components are kept as-is; symlinks are not resolved.
    ///
    /// # Arguments
    /// * `base` - Directory used for relative paths
    /// * `path` - Path to resolve
    ///
    /// # Returns
    /// * `PathBuf` - Absolute path when `base` is absolute
    pub fn resolve(base: &Path, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        };

        joined
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }
}

/// Time utilities
pub mod time {
    use super::*;

    /// Format duration as human-readable string
    ///
    /// # Arguments
    /// * `duration` - Duration to format
    ///
    /// # Returns
    /// * `String` - Formatted duration (e.g., "1h 30m 45s")
    pub fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs();
        let millis = duration.subsec_millis();

        if secs == 0 {
            return format!("{}ms", millis);
        }

        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        let mut parts = Vec::new();

        if hours > 0 {
            parts.push(format!("{}h", hours));
        }
        if minutes > 0 {
            parts.push(format!("{}m", minutes));
        }
        if seconds > 0 || parts.is_empty() {
            parts.push(format!("{}s", seconds));
        }

        parts.join(" ")
    }
}

/// Validation utilities
pub mod validate {
    /// Maximum size of a Firestore collection id in bytes
    const MAX_COLLECTION_ID_BYTES: usize = 1500;

    /// Validate a top-level Firestore collection id
    ///
    /// The id doubles as the output file stem, so path separators are
    /// rejected as well.
    ///
    /// # Arguments
    /// * `name` - Collection id to validate
    ///
    /// # Returns
    /// * `bool` - True if valid
    pub fn is_valid_collection_id(name: &str) -> bool {
        if name.is_empty() || name.len() > MAX_COLLECTION_ID_BYTES {
            return false;
        }

        if name == "." || name == ".." {
            return false;
        }

        // Ids matching __.*__ are reserved
        if name.len() >= 4 && name.starts_with("__") && name.ends_with("__") {
            return false;
        }

        !name.chars().any(|c| c == '/' || c == '\\' || c == '\0')
    }
}

/// Conversion utilities
pub mod convert {
    /// Format bytes as human-readable size
    ///
    /// # Arguments
    /// * `bytes` - Number of bytes
    ///
    /// # Returns
    /// * `String` - Formatted size (e.g., "1.5 MB")
    pub fn format_bytes(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id() {
        assert_eq!(path::document_id("users/alice"), "alice");
        assert_eq!(
            path::document_id("projects/p/databases/(default)/documents/users/bob"),
            "bob"
        );
        assert_eq!(path::document_id("solo"), "solo");
    }

    #[test]
    fn test_resolve_drops_cur_dir() {
        let base = Path::new("/work");
        assert_eq!(
            path::resolve(base, Path::new("./users.json")),
            PathBuf::from("/work/users.json")
        );
        assert_eq!(
            path::resolve(&base.join("."), Path::new("users.json")),
            PathBuf::from("/work/users.json")
        );
        assert_eq!(
            path::resolve(base, Path::new("/tmp/out/users.json")),
            PathBuf::from("/tmp/out/users.json")
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(time::format_duration(Duration::from_secs(0)), "0ms");
        assert_eq!(time::format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(time::format_duration(Duration::from_secs(3661)), "1h 1m 1s");
    }

    #[test]
    fn test_valid_collection_id() {
        assert!(validate::is_valid_collection_id("users"));
        assert!(validate::is_valid_collection_id("order-items_2024"));
        assert!(!validate::is_valid_collection_id(""));
        assert!(!validate::is_valid_collection_id(".."));
        assert!(!validate::is_valid_collection_id("users/alice/posts"));
        assert!(!validate::is_valid_collection_id("__reserved__"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(convert::format_bytes(500), "500 B");
        assert_eq!(convert::format_bytes(1024), "1.00 KB");
        assert_eq!(convert::format_bytes(1024 * 1024), "1.00 MB");
    }
}
