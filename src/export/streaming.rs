//! Document sources and batched streaming for export operations
//!
//! A [`DocumentSource`] opens a lazy, finite stream of documents for one
//! collection. The stream yields `Some(Ok(doc))` per document, `Some(Err(_))`
//! when a page cannot be read, and `None` once the collection is exhausted.
//! It cannot be restarted; a new stream has to be opened instead.

use async_trait::async_trait;
use firestore::errors::FirestoreError;
use futures::stream::BoxStream;
use gcloud_sdk::google::firestore::v1::Document;
use futures::{StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::connection::FirestoreHandle;
use crate::error::{BackupError, Result};
use crate::formatter::FirestoreJsonConverter;

use super::record::SourceDocument;

/// Stream of documents read from one collection
pub type DocumentStream<'a> = BoxStream<'a, Result<SourceDocument>>;

/// Anything that can page through a collection
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Open a paged query against `collection`
    ///
    /// # Arguments
    /// * `collection` - Collection id
    ///
    /// # Returns
    /// * `Result<DocumentStream>` - Lazy document stream or a remote read error
    async fn stream<'a>(&'a self, collection: &'a str) -> Result<DocumentStream<'a>>;
}

/// Map a Firestore failure while reading `collection`
///
/// The token source only talks to the identity provider on the first
/// request, so a rejected credential surfaces here as an `Unauthenticated`
/// or `PermissionDenied` status. Those are auth errors; everything else is a
/// remote read error for the collection.
fn read_error(collection: &str, err: FirestoreError) -> BackupError {
    match &err {
        FirestoreError::DatabaseError(e)
            if matches!(e.public.code.as_str(), "Unauthenticated" | "PermissionDenied") =>
        {
            BackupError::Auth(format!("credential rejected while reading {collection}: {err}"))
        }
        _ => BackupError::RemoteRead {
            collection: collection.to_string(),
            message: err.to_string(),
        },
    }
}

/// Convert a fetched Firestore document
fn source_document(doc: Document) -> SourceDocument {
    let fields = FirestoreJsonConverter::new().convert_fields(&doc.fields);
    SourceDocument::new(doc.name, fields)
}

#[async_trait]
impl DocumentSource for FirestoreHandle {
    async fn stream<'a>(&'a self, collection: &'a str) -> Result<DocumentStream<'a>> {
        debug!(
            "Listing collection {} with page size {}",
            collection,
            self.page_size()
        );

        let pages = self
            .db()
            .fluent()
            .list()
            .from(collection)
            .page_size(self.page_size())
            .stream_all_with_errors()
            .await
            .map_err(|e| read_error(collection, e))?;

        let documents =
            pages.map(move |item| item.map(source_document).map_err(|e| read_error(collection, e)));

        Ok(documents.boxed())
    }
}

/// Batched reader over a [`DocumentStream`]
///
/// Groups documents into batches so progress can be reported without
/// touching the terminal for every single document.
pub struct DocumentBatches<'a> {
    stream: Option<DocumentStream<'a>>,
    batch_size: usize,
    total_fetched: u64,
    collection: String,
    closed: bool,
}

impl<'a> DocumentBatches<'a> {
    /// Create a new batched reader
    ///
    /// # Arguments
    /// * `stream` - Document stream for one collection
    /// * `batch_size` - Maximum documents per batch
    /// * `collection` - Collection id for logging
    pub fn new(stream: DocumentStream<'a>, batch_size: usize, collection: &str) -> Self {
        Self {
            stream: Some(stream),
            batch_size: batch_size.max(1),
            total_fetched: 0,
            collection: collection.to_string(),
            closed: false,
        }
    }

    /// Fetch the next batch of documents
    ///
    /// # Returns
    /// * `Result<Option<Vec<SourceDocument>>>` - Next batch, or None if exhausted
    pub async fn next_batch(&mut self) -> Result<Option<Vec<SourceDocument>>> {
        if self.closed {
            return Ok(None);
        }

        let stream = match self.stream.as_mut() {
            Some(s) => s,
            None => return Ok(None),
        };

        let mut batch = Vec::with_capacity(self.batch_size);

        while batch.len() < self.batch_size {
            match stream.try_next().await {
                Ok(Some(doc)) => batch.push(doc),
                Ok(None) => break,
                Err(e) => {
                    // A failed stream is not resumable
                    self.stream = None;
                    self.closed = true;
                    return Err(e);
                }
            }
        }

        if batch.is_empty() {
            debug!(
                "Collection {} exhausted after {} documents",
                self.collection, self.total_fetched
            );
            self.stream = None;
            self.closed = true;
            Ok(None)
        } else {
            self.total_fetched += batch.len() as u64;
            debug!(
                "Fetched batch of {} documents from {} (total: {})",
                batch.len(),
                self.collection,
                self.total_fetched
            );
            Ok(Some(batch))
        }
    }

    /// Release the underlying stream
    pub fn close(&mut self) {
        if !self.closed {
            self.stream = None;
            self.closed = true;
            info!(
                "Closed stream for {} after fetching {} documents",
                self.collection, self.total_fetched
            );
        }
    }

    /// Documents fetched so far
    pub fn total_fetched(&self) -> u64 {
        self.total_fetched
    }
}

impl Drop for DocumentBatches<'_> {
    fn drop(&mut self) {
        if !self.closed {
            debug!("DocumentBatches for {} dropped without close", self.collection);
            self.stream = None;
        }
    }
}
