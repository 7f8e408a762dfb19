//! Service-account key loading
//!
//! Only the fields needed to resolve the project and to log the account are
//! read here. Token exchange happens inside the Firestore client.

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CredentialError, Result};

/// Parsed subset of a Google service-account key file
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Credential type, `service_account` for admin SDK keys
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,

    /// Project the key belongs to
    #[serde(default)]
    pub project_id: Option<String>,

    /// Service account email
    #[serde(default)]
    pub client_email: Option<String>,

    /// Location of the key on disk
    #[serde(skip)]
    pub path: PathBuf,
}

impl ServiceAccountKey {
    /// Load and parse a key file
    ///
    /// # Arguments
    /// * `path` - Path to the `*-firebase-adminsdk-*.json` file
    ///
    /// # Returns
    /// * `Result<Self>` - Parsed key or a credential error
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CredentialError::NotFound(path.to_path_buf()),
            _ => CredentialError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::from_json(&contents, path)
    }

    /// Parse key file contents
    ///
    /// # Arguments
    /// * `contents` - Raw JSON text
    /// * `path` - Path reported in errors
    pub fn from_json(contents: &str, path: &Path) -> Result<Self> {
        let mut key: ServiceAccountKey =
            serde_json::from_str(contents).map_err(|e| CredentialError::Malformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if key.account_type.is_none() {
            return Err(CredentialError::Malformed {
                path: path.to_path_buf(),
                message: "missing \"type\" field".to_string(),
            }
            .into());
        }

        key.path = path.to_path_buf();
        Ok(key)
    }

    /// Whether this is a service-account key (as opposed to e.g. user credentials)
    pub fn is_service_account(&self) -> bool {
        self.account_type.as_deref() == Some("service_account")
    }

    /// Project id from the key, ignoring blank values
    pub fn project_id(&self) -> Option<&str> {
        self.project_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}
