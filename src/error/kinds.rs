use std::path::PathBuf;
use std::{fmt, io};

/// Crate-wide `Result` type using [`BackupError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, BackupError>;

/// Top-level error type for backup runs.
///
/// Every variant is created where the failure happens and travels up
/// unchanged; `main` prints it and exits with [`BackupError::exit_code`].
#[derive(Debug)]
pub enum BackupError {
    /// Invalid command-line usage detected after argument parsing.
    Usage(String),

    /// The credential file could not be used.
    Credential(CredentialError),

    /// The identity layer rejected the credential or no project could be resolved.
    Auth(String),

    /// Paging through a collection failed.
    RemoteRead { collection: String, message: String },

    /// A requested collection yielded no documents.
    EmptyCollection(String),

    /// Writing an output file failed.
    Write { path: PathBuf, source: io::Error },

    /// Any other I/O failure (e.g. reporting to stdout).
    Io(io::Error),

    /// The export record could not be serialized.
    Serialize(serde_json::Error),
}

/// Credential-file errors.
#[derive(Debug)]
pub enum CredentialError {
    /// The file does not exist.
    NotFound(PathBuf),

    /// The file exists but could not be read.
    Unreadable { path: PathBuf, source: io::Error },

    /// The file is not a valid service-account key.
    Malformed { path: PathBuf, message: String },
}

impl BackupError {
    /// Process exit code for this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            BackupError::Usage(_) => 2,
            BackupError::Credential(_) => 3,
            BackupError::Auth(_) => 4,
            BackupError::RemoteRead { .. } => 5,
            BackupError::EmptyCollection(_) => 6,
            BackupError::Write { .. } | BackupError::Io(_) => 7,
            BackupError::Serialize(_) => 1,
        }
    }
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::Usage(msg) => write!(f, "Usage error: {msg}"),
            BackupError::Credential(e) => write!(f, "Credential error: {e}"),
            BackupError::Auth(msg) => write!(f, "Authentication error: {msg}"),
            BackupError::RemoteRead {
                collection,
                message,
            } => write!(f, "Failed to read collection {collection}: {message}"),
            BackupError::EmptyCollection(name) => {
                write!(f, "No documents found in collection {name}")
            }
            BackupError::Write { path, source } => {
                write!(f, "Failed to write {}: {source}", path.display())
            }
            BackupError::Io(e) => write!(f, "I/O error: {e}"),
            BackupError::Serialize(e) => write!(f, "Serialization error: {e}"),
        }
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::NotFound(path) => {
                write!(f, "credential file not found: {}", path.display())
            }
            CredentialError::Unreadable { path, source } => {
                write!(f, "cannot read credential file {}: {source}", path.display())
            }
            CredentialError::Malformed { path, message } => {
                write!(f, "invalid credential file {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for BackupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackupError::Credential(e) => Some(e),
            BackupError::Write { source, .. } => Some(source),
            BackupError::Io(e) => Some(e),
            BackupError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for CredentialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CredentialError::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

/* ========================= Conversions to BackupError ========================= */

impl From<io::Error> for BackupError {
    fn from(err: io::Error) -> Self {
        BackupError::Io(err)
    }
}

impl From<serde_json::Error> for BackupError {
    fn from(err: serde_json::Error) -> Self {
        BackupError::Serialize(err)
    }
}

impl From<CredentialError> for BackupError {
    fn from(err: CredentialError) -> Self {
        BackupError::Credential(err)
    }
}
