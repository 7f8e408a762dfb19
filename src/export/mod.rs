//! Collection export pipeline
//!
//! This module turns remote collections into local JSON files:
//! - Paged reads through a [`DocumentSource`]
//! - Progress feedback while a collection is drained
//! - Assembly of the `[{id: fields}, ...]` export record
//! - Writing `<collection>.json` and reporting its absolute path
//!
//! # Architecture
//!
//! 1. **DocumentSource**: opens a lazy document stream per collection
//!    (implemented by `FirestoreHandle`)
//! 2. **DocumentBatches**: reads the stream in batches for progress updates
//! 3. **ExportRecord**: ordered single-key records, serialized by `JsonFormatter`
//! 4. **JsonFileWriter**: writes the file into the output directory
//!
//! These are orchestrated by the **ExportCoordinator**, which runs the
//! collections sequentially and stops at the first error.
//!
//! # Example
//!
//! ```no_run
//! use firestore_backup::config::Config;
//! use firestore_backup::connection::ConnectionManager;
//! use firestore_backup::export::ExportCoordinator;
//!
//! # async fn run() -> firestore_backup::Result<()> {
//! let config = Config::default();
//! let manager = ConnectionManager::new(config.connection.clone());
//! let handle = manager.connect("service-account.json".as_ref()).await?;
//!
//! let coordinator = ExportCoordinator::new(&handle, &config.export);
//! coordinator.execute(&["users".to_string()]).await?;
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod progress;
pub mod record;
pub mod streaming;
pub mod writer;

pub use coordinator::{ExportCoordinator, ExportResult};
pub use progress::ProgressTracker;
pub use record::{DocumentRecord, ExportRecord, SourceDocument};
pub use streaming::{DocumentBatches, DocumentSource, DocumentStream};
pub use writer::JsonFileWriter;
