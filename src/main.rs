//! Firestore Backup
//!
//! Dumps Cloud Firestore collections to local JSON files.
//!
//! # Usage
//!
//! ```bash
//! firestore-backup backup -c users -c orders -p ./my-project-firebase-adminsdk.json
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;

use firestore_backup::cli::CliInterface;
use firestore_backup::connection::ConnectionManager;
use firestore_backup::error::{BackupError, Result};
use firestore_backup::export::ExportCoordinator;
use firestore_backup::utils::{convert::format_bytes, time::format_duration};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments
/// 2. Initialize logging
/// 3. Handle non-backup subcommands
/// 4. Run the backup
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    run_backup(&cli).await
}

/// Connect and export the requested collections
///
/// The Firestore handle lives for the duration of this function and is
/// released on every exit path.
async fn run_backup(cli: &CliInterface) -> Result<()> {
    let args = cli
        .backup_args()
        .ok_or_else(|| BackupError::Usage("no backup requested".to_string()))?;

    // Usage errors surface before any network activity
    let collections = cli.collections()?;
    cli.config().validate()?;

    let manager = ConnectionManager::new(cli.config().connection.clone());
    let handle = manager.connect(&args.path).await?;

    let started = std::time::Instant::now();
    let results = ExportCoordinator::new(&handle, &cli.config().export)
        .execute(&collections)
        .await?;

    let documents: u64 = results.iter().map(|r| r.documents_exported).sum();
    let bytes: u64 = results.iter().map(|r| r.file_size_bytes).sum();
    info!(
        "Backup finished: {} collections, {} documents, {} in {}",
        results.len(),
        documents,
        format_bytes(bytes),
        format_duration(started.elapsed())
    );

    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// `RUST_LOG` takes precedence over the verbosity flags. Logs go to stderr
/// so stdout only carries the saved-collection lines.
fn initialize_logging(cli: &CliInterface) {
    let logging = &cli.config().logging;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_filter()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(logging.color)
        .with_writer(std::io::stderr);

    if logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
