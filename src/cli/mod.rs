//! Command-line interface for firestore-backup
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Building the run configuration from arguments
//! - Collection list validation before any network activity
//! - Non-backup subcommands (shell completion)

pub mod completion;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::error::{BackupError, Result};
use crate::utils::validate::is_valid_collection_id;

/// Backup Firestore database collections to JSON files
#[derive(Parser, Debug)]
#[command(
    name = "firestore-backup",
    version,
    about = "Backup Firestore database collections to JSON files",
    long_about = "Connects to Cloud Firestore with a service-account key, reads every document
of the requested collections and writes each collection to <collection>.json."
)]
pub struct CliArgs {
    /// Quiet mode (errors only, no progress)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Prefix log lines with timestamps
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for firestore-backup
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Backup firestore collections
    Backup(BackupArgs),

    /// Generate shell completion script
    Completion {
        /// Shell type
        #[arg(value_enum, value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments of the `backup` subcommand
#[derive(Args, Debug, Clone)]
pub struct BackupArgs {
    /// Choice collections for backup (repeatable or comma-separated)
    #[arg(
        short = 'c',
        long,
        value_name = "NAME",
        required = true,
        num_args = 1..,
        value_delimiter = ','
    )]
    pub collections: Vec<String>,

    /// Path to file *-firebase-adminsdk-*.json
    #[arg(short = 'p', long, value_name = "FILE")]
    pub path: PathBuf,

    /// Project id (defaults to the key's project_id)
    #[arg(long, value_name = "ID", env = "FIRESTORE_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Firestore database id
    #[arg(long, value_name = "ID")]
    pub database_id: Option<String>,

    /// Directory for the output files
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Documents requested per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Effective configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    ///
    /// Exits the process with a usage message when parsing fails.
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Ok(Self::from_args(CliArgs::parse()))
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Self {
        let mut config = Config::default();
        Self::apply_args_to_config(&mut config, &args);
        Self { args, config }
    }

    /// Get the configuration
    ///
    /// # Returns
    /// * `&Config` - Reference to configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    ///
    /// # Returns
    /// * `&CliArgs` - Reference to arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Arguments of the `backup` subcommand, if that is the one invoked
    pub fn backup_args(&self) -> Option<&BackupArgs> {
        match &self.args.command {
            Commands::Backup(args) => Some(args),
            _ => None,
        }
    }

    /// Validated list of collections to export
    ///
    /// # Returns
    /// * `Result<Vec<String>>` - Collection ids in the given order, or a usage error
    pub fn collections(&self) -> Result<Vec<String>> {
        let args = self
            .backup_args()
            .ok_or_else(|| BackupError::Usage("no backup requested".to_string()))?;

        if args.collections.is_empty() {
            return Err(BackupError::Usage("Set collections!".to_string()));
        }

        if let Some(bad) = args
            .collections
            .iter()
            .find(|name| !is_valid_collection_id(name))
        {
            return Err(BackupError::Usage(format!(
                "invalid collection name {:?}",
                bad
            )));
        }

        Ok(args.collections.clone())
    }

    /// Apply CLI arguments to configuration
    ///
    /// # Arguments
    /// * `config` - Configuration to modify
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_logging_args(config, args);

        if let Commands::Backup(backup) = &args.command {
            Self::apply_connection_args(config, backup);
            Self::apply_export_args(config, args, backup);
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };

        if args.no_color {
            config.logging.color = false;
        }

        if args.log_timestamps {
            config.logging.timestamps = true;
        }
    }

    /// Apply connection-related CLI arguments to configuration
    fn apply_connection_args(config: &mut Config, backup: &BackupArgs) {
        if let Some(project) = &backup.project_id {
            config.connection.project_id = Some(project.clone());
        }

        if let Some(database) = &backup.database_id {
            config.connection.database_id = database.clone();
        }

        if let Some(page_size) = backup.page_size {
            config.connection.page_size = page_size;
        }
    }

    /// Apply export-related CLI arguments to configuration
    fn apply_export_args(config: &mut Config, args: &CliArgs, backup: &BackupArgs) {
        if let Some(dir) = &backup.output_dir {
            config.export.output_dir = dir.clone();
        }

        if backup.no_progress || args.quiet {
            config.export.show_progress = false;
        }
    }

    /// Handle subcommands other than `backup`
    ///
    /// # Returns
    /// * `Result<bool>` - True if a subcommand was handled, false to run the backup
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Commands::Completion { shell } => {
                let mut stdout = std::io::stdout();
                completion::generate_completion(*shell, &mut stdout);
                Ok(true)
            }
            Commands::Backup(_) => Ok(false),
        }
    }
}
