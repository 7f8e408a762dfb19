//! Connection management for Firestore
//!
//! This module turns a service-account key file into an authenticated
//! [`FirestoreHandle`]:
//! - Credential file loading and validation
//! - Project id resolution (key file or explicit override)
//! - Client construction with the key as token source

pub mod credentials;

use firestore::{FirestoreDb, FirestoreDbOptions};
use gcloud_sdk::{GCP_DEFAULT_SCOPES, TokenSourceType};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::ConnectionConfig;
use crate::error::{BackupError, Result};

pub use credentials::ServiceAccountKey;

/// Firestore connection manager
///
/// Establishes one handle per run. The handle is passed to the exporter
/// explicitly; nothing is kept in global state.
pub struct ConnectionManager {
    /// Connection configuration
    config: ConnectionConfig,
}

/// Authenticated, read-only handle to a Firestore database
///
/// Released when dropped, which happens exactly once at the end of a run.
pub struct FirestoreHandle {
    /// Firestore client
    db: FirestoreDb,

    /// Project the client is bound to
    project_id: String,

    /// Database id within the project
    database_id: String,

    /// Documents requested per remote page
    page_size: usize,
}

impl ConnectionManager {
    /// Create a new connection manager
    ///
    /// # Arguments
    /// * `config` - Connection configuration
    ///
    /// # Returns
    /// * `Self` - New connection manager instance
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    /// Establish an authenticated handle
    ///
    /// # Arguments
    /// * `credential_path` - Path to the service-account key file
    ///
    /// # Returns
    /// * `Result<FirestoreHandle>` - Handle, or a credential/auth error
    pub async fn connect(&self, credential_path: &Path) -> Result<FirestoreHandle> {
        let key = ServiceAccountKey::from_file(credential_path)?;

        if !key.is_service_account() {
            warn!(
                "Credential type is {:?}, expected \"service_account\"",
                key.account_type.as_deref().unwrap_or_default()
            );
        }

        let project_id = self.resolve_project_id(&key)?;
        debug!(
            "Connecting to project {} database {} as {}",
            project_id,
            self.config.database_id,
            key.client_email.as_deref().unwrap_or("<unknown>")
        );

        let options = FirestoreDbOptions::new(project_id.clone())
            .with_database_id(self.config.database_id.clone());

        let db = FirestoreDb::with_options_token_source(
            options,
            GCP_DEFAULT_SCOPES.clone(),
            TokenSourceType::File(credential_path.to_path_buf()),
        )
        .await
        .map_err(|e| BackupError::Auth(e.to_string()))?;

        info!("Connected to Firestore project {}", project_id);

        Ok(FirestoreHandle {
            db,
            project_id,
            database_id: self.config.database_id.clone(),
            page_size: self.config.page_size,
        })
    }

    /// Resolve the project to bind to
    ///
    /// The configured override wins over the key's own `project_id`.
    ///
    /// # Arguments
    /// * `key` - Parsed credential
    ///
    /// # Returns
    /// * `Result<String>` - Project id, or an auth error when none is known
    pub fn resolve_project_id(&self, key: &ServiceAccountKey) -> Result<String> {
        if let Some(project) = self.config.project_id.as_deref().map(str::trim) {
            if !project.is_empty() {
                return Ok(project.to_string());
            }
        }

        key.project_id().map(str::to_string).ok_or_else(|| {
            BackupError::Auth(format!(
                "cannot resolve project id from {}; pass --project-id",
                key.path.display()
            ))
        })
    }
}

impl FirestoreHandle {
    /// Underlying Firestore client
    pub fn db(&self) -> &FirestoreDb {
        &self.db
    }

    /// Project the handle is bound to
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Documents requested per remote page
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl Drop for FirestoreHandle {
    fn drop(&mut self) {
        debug!(
            "Closing Firestore handle for project {} database {}",
            self.project_id, self.database_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CredentialError;
    use std::path::PathBuf;

    fn key_with_project(project: Option<&str>) -> ServiceAccountKey {
        ServiceAccountKey {
            account_type: Some("service_account".to_string()),
            project_id: project.map(str::to_string),
            client_email: None,
            path: PathBuf::from("key.json"),
        }
    }

    #[test]
    fn test_project_from_key() {
        let manager = ConnectionManager::new(ConnectionConfig::default());
        let project = manager
            .resolve_project_id(&key_with_project(Some("from-key")))
            .unwrap();
        assert_eq!(project, "from-key");
    }

    #[test]
    fn test_project_override_wins() {
        let config = ConnectionConfig {
            project_id: Some("override".to_string()),
            ..ConnectionConfig::default()
        };
        let manager = ConnectionManager::new(config);
        let project = manager
            .resolve_project_id(&key_with_project(Some("from-key")))
            .unwrap();
        assert_eq!(project, "override");
    }

    #[test]
    fn test_unresolvable_project_is_auth_error() {
        let manager = ConnectionManager::new(ConnectionConfig::default());
        let err = manager
            .resolve_project_id(&key_with_project(None))
            .unwrap_err();
        assert!(matches!(err, BackupError::Auth(_)));
        assert_eq!(err.exit_code(), 4);
    }

    #[tokio::test]
    async fn test_connect_with_missing_file_fails_before_network() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConnectionManager::new(ConnectionConfig::default());

        let result = manager.connect(&dir.path().join("missing.json")).await;
        assert!(matches!(
            result,
            Err(BackupError::Credential(CredentialError::NotFound(_)))
        ));
    }
}
