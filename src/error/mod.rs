//! Error handling for backup runs.
//!
//! All failures are represented by [`BackupError`]. Each category maps to its
//! own process exit code so scripts can tell a missing credential apart from
//! an empty collection.
//!
//! # Example
//!
//! ```rust
//! use firestore_backup::error::{BackupError, Result};
//!
//! fn check(names: &[String]) -> Result<()> {
//!     if names.is_empty() {
//!         return Err(BackupError::Usage("no collections given".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(check(&[]).unwrap_err().exit_code(), 2);
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{BackupError, CredentialError, Result};
