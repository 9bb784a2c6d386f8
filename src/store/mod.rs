//! The storage side of docket: a document-store seam, its Firestore and
//! in-memory backends, and the typed gateway that sits on top.

pub mod firestore;
pub mod gateway;
pub mod keyring;
pub mod memory;

use std::future::Future;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{BackendKind, DocketConfig};

pub use firestore::FirestoreStore;
pub use gateway::Gateway;
pub use memory::{IdStrategy, MemoryStore};

pub const CLIENTS: &str = "clients";
pub const PROJECTS: &str = "projects";
pub const TASKS: &str = "tasks";

/// Top-level fields of a stored document.
pub type Fields = Map<String, Value>;

/// A document as listed from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// Any failure talking to the document store.
///
/// Callers treat every variant the same way; the variants only exist to make
/// the message useful.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("no document {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("malformed document: {0}")]
    Decode(String),

    #[error("backend unavailable")]
    Unavailable,

    #[error("credentials: {0}")]
    Credentials(String),

    #[error("configuration: {0}")]
    Config(String),
}

impl BackendError {
    pub(crate) fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/// Create/update/delete/list over named collections of JSON documents.
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return the identifier the backend assigned.
    fn create(
        &self,
        collection: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;

    /// Overwrite only the supplied top-level fields of an existing document.
    fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn delete(&self, collection: &str, id: &str)
    -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Every document in the collection, in backend order.
    fn list(&self, collection: &str) -> impl Future<Output = Result<Vec<Document>, BackendError>> + Send;
}

/// Backend picked at startup from configuration.
#[derive(Debug)]
pub enum AnyStore {
    Firestore(FirestoreStore),
    Memory(MemoryStore),
}

impl DocumentStore for AnyStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, BackendError> {
        match self {
            Self::Firestore(s) => s.create(collection, fields).await,
            Self::Memory(s) => s.create(collection, fields).await,
        }
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), BackendError> {
        match self {
            Self::Firestore(s) => s.update(collection, id, fields).await,
            Self::Memory(s) => s.update(collection, id, fields).await,
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        match self {
            Self::Firestore(s) => s.delete(collection, id).await,
            Self::Memory(s) => s.delete(collection, id).await,
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, BackendError> {
        match self {
            Self::Firestore(s) => s.list(collection).await,
            Self::Memory(s) => s.list(collection).await,
        }
    }
}

/// Build the backend the configuration asks for.
///
/// For Firestore the API key comes from the configuration (environment) or,
/// failing that, from the system keyring. A keyring that cannot be reached is
/// not fatal: emulators and open security rules work without a key.
pub async fn open(config: &DocketConfig) -> Result<AnyStore, BackendError> {
    match config.backend {
        BackendKind::Memory => {
            log::info!("Using in-memory backend; nothing will be persisted");
            Ok(AnyStore::Memory(MemoryStore::new()))
        }
        BackendKind::Firestore => {
            let fs = &config.firestore;
            let project_id = fs.project_id.trim();
            if project_id.is_empty() {
                return Err(BackendError::Config("no Firestore project id configured".into()));
            }

            if let Some(ref host) = fs.emulator_host {
                log::info!("Using Firestore emulator at {} for project {}", host, project_id);
                return FirestoreStore::emulator(host, project_id, &fs.database).map(AnyStore::Firestore);
            }

            let api_key = match fs.api_key.clone() {
                Some(key) => Some(key),
                None => match keyring::load_api_key(project_id).await {
                    Ok(key) => key,
                    Err(e) => {
                        log::warn!("Continuing without an API key: {}", e);
                        None
                    }
                },
            };
            log::info!("Using Firestore project {} ({})", project_id, fs.database);
            FirestoreStore::new(project_id, &fs.database, api_key).map(AnyStore::Firestore)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FirestoreSettings;

    #[tokio::test]
    async fn memory_backend_needs_no_settings() {
        let config = DocketConfig {
            backend: BackendKind::Memory,
            ..Default::default()
        };
        assert!(matches!(open(&config).await.unwrap(), AnyStore::Memory(_)));
    }

    #[tokio::test]
    async fn firestore_without_project_is_a_config_error() {
        let config = DocketConfig::default();
        assert!(matches!(open(&config).await.unwrap_err(), BackendError::Config(_)));
    }

    #[tokio::test]
    async fn emulator_host_skips_the_keyring() {
        let config = DocketConfig {
            firestore: FirestoreSettings {
                project_id: "demo".into(),
                emulator_host: Some("localhost:8080".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        match open(&config).await.unwrap() {
            AnyStore::Firestore(store) => assert_eq!(
                store.documents_url(),
                "http://localhost:8080/v1/projects/demo/databases/(default)/documents"
            ),
            other => panic!("expected Firestore, got {:?}", other),
        }
    }
}
