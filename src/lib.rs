//! Firestore Backup Library
//!
//! This library provides the core functionality of the `firestore-backup`
//! tool: connect to Cloud Firestore with a service-account key and dump
//! collections to local JSON files.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Run configuration
//! - `connection`: Credential loading and Firestore handle
//! - `error`: Error types and exit codes
//! - `export`: Collection export pipeline
//! - `formatter`: Firestore value conversion and JSON output
//! - `utils`: Utility functions and helpers
//!
//! # Example
//!
//! ```no_run
//! use firestore_backup::{Config, ConnectionManager, ExportCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let manager = ConnectionManager::new(config.connection.clone());
//!     let handle = manager.connect("firebase-adminsdk.json".as_ref()).await?;
//!
//!     let collections = vec!["users".to_string(), "orders".to_string()];
//!     ExportCoordinator::new(&handle, &config.export)
//!         .execute(&collections)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod export;
pub mod formatter;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use connection::{ConnectionManager, FirestoreHandle};
pub use error::{BackupError, Result};
pub use export::{DocumentSource, ExportCoordinator, ExportResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
