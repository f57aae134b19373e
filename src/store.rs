//! In-memory document store and feedback log.
//!
//! Process-lifetime state behind explicit injectable objects, so tests get
//! fresh instances instead of module globals. Both structures only ever
//! grow: documents are never updated or deleted, feedback is strictly
//! append-only. An atomic counter hands out document identifiers, and the
//! `RwLock`s serialize concurrent insertions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::models::{Document, DocumentInfo, FeedbackRecord};

/// Keyed in-memory document storage.
pub struct DocumentStore {
    next_id: AtomicU64,
    docs: RwLock<Vec<Document>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            docs: RwLock::new(Vec::new()),
        }
    }

    /// Store a document under a freshly assigned `doc_{n}` identifier.
    ///
    /// Identifiers are strictly monotonic and unique even under concurrent
    /// uploads.
    pub fn add(&self, name: &str, text: String) -> Document {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let doc = Document {
            id: format!("doc_{}", n),
            name: name.to_string(),
            text,
        };
        self.docs.write().unwrap().push(doc.clone());
        doc
    }

    /// List stored documents (id + name) in insertion order.
    pub fn list(&self) -> Vec<DocumentInfo> {
        self.docs
            .read()
            .unwrap()
            .iter()
            .map(|d| DocumentInfo {
                id: d.id.clone(),
                name: d.name.clone(),
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Document> {
        self.docs
            .read()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    /// Fetch the documents whose display names appear in `names`,
    /// in store order.
    pub fn find_by_names(&self, names: &[String]) -> Vec<Document> {
        self.docs
            .read()
            .unwrap()
            .iter()
            .filter(|d| names.iter().any(|n| n == &d.name))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.docs.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Append-only feedback log.
pub struct FeedbackLog {
    entries: RwLock<Vec<FeedbackRecord>>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append a record and return the new total count.
    pub fn append(&self, record: FeedbackRecord) -> usize {
        let mut entries = self.entries.write().unwrap();
        entries.push(record);
        entries.len()
    }

    /// Snapshot of all records in append order.
    pub fn all(&self) -> Vec<FeedbackRecord> {
        self.entries.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FeedbackLog {
    fn default() -> Self {
        Self::new()
    }
}
