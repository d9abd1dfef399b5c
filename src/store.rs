// ABOUTME: Document store module for the carousel-slides application
// ABOUTME: Owns the multi-document editing state and its best-effort persistence

use crate::errors::{CarouselError, Result};
use crate::markdown::DEFAULT_MARKDOWN;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Name given to newly created documents.
pub const DEFAULT_DOCUMENT_NAME: &str = "Untitled";

/// One editable markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub content: String,
    pub created_at: i64,
}

/// The persisted collection: all documents plus the active pointer.
/// `active_id` is resolved at read time and self-heals to the first
/// document, so a dangling pointer is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentState {
    pub documents: Vec<Document>,
    pub active_id: String,
}

/// Storage capability injected into the store. Implementations load and
/// save the whole state; the store treats every fault as best-effort.
pub trait DocumentStorage {
    /// Load the persisted state, `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<DocumentState>>;

    /// Persist the whole state.
    fn save(&self, state: &DocumentState) -> Result<()>;
}

/// File-backed storage holding the state as one pretty-printed JSON
/// document.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<DocumentState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            CarouselError::StorageError(format!("Failed to read {:?}: {}", self.path, e))
        })?;
        let state: DocumentState = serde_json::from_str(&raw)?;
        Ok(Some(state))
    }

    fn save(&self, state: &DocumentState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    CarouselError::StorageError(format!(
                        "Failed to create {:?}: {}",
                        parent, e
                    ))
                })?;
            }
        }
        let raw = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, raw).map_err(|e| {
            CarouselError::StorageError(format!("Failed to write {:?}: {}", self.path, e))
        })
    }
}

fn new_default_document() -> Document {
    Document {
        id: uuid::Uuid::new_v4().to_string(),
        name: DEFAULT_DOCUMENT_NAME.to_string(),
        content: DEFAULT_MARKDOWN.to_string(),
        created_at: chrono::Utc::now().timestamp_millis(),
    }
}

fn default_state() -> DocumentState {
    let doc = new_default_document();
    let active_id = doc.id.clone();
    DocumentState {
        documents: vec![doc],
        active_id,
    }
}

/// State container over a [`DocumentState`]. The collection always holds
/// at least one document; every mutation persists the whole state through
/// the injected storage, with write failures logged and swallowed.
pub struct DocumentStore {
    state: DocumentState,
    storage: Box<dyn DocumentStorage>,
}

impl DocumentStore {
    /// Open the store, loading persisted state or synthesizing a single
    /// default document when storage is absent, unreadable, or empty.
    pub fn open(storage: Box<dyn DocumentStorage>) -> Self {
        let state = match storage.load() {
            Ok(Some(state)) if !state.documents.is_empty() => {
                info!("Loaded {} document(s) from storage", state.documents.len());
                state
            }
            Ok(_) => default_state(),
            Err(e) => {
                warn!("Failed to load documents from storage: {}", e);
                default_state()
            }
        };
        Self { state, storage }
    }

    pub fn documents(&self) -> &[Document] {
        &self.state.documents
    }

    pub fn active_id(&self) -> &str {
        &self.state.active_id
    }

    /// The active document, falling back to the first document when the
    /// active pointer does not resolve.
    pub fn active(&self) -> &Document {
        self.state
            .documents
            .iter()
            .find(|d| d.id == self.state.active_id)
            // collection is never empty by construction
            .unwrap_or(&self.state.documents[0])
    }

    /// Replace the active document's content. No-op when the active
    /// pointer does not resolve.
    pub fn set_active_content(&mut self, content: &str) {
        let active_id = self.state.active_id.clone();
        if let Some(doc) = self.state.documents.iter_mut().find(|d| d.id == active_id) {
            doc.content = content.to_string();
            self.persist();
        }
    }

    /// Append a fresh default document, make it active, and return its id.
    pub fn add(&mut self) -> String {
        let doc = new_default_document();
        let id = doc.id.clone();
        self.state.documents.push(doc);
        self.state.active_id = id.clone();
        self.persist();
        id
    }

    /// Remove a document by id. Removing the last remaining document is a
    /// no-op; removing the active document selects its predecessor (or the
    /// new first document).
    pub fn remove(&mut self, id: &str) {
        if self.state.documents.len() <= 1 {
            return;
        }
        let Some(index) = self.state.documents.iter().position(|d| d.id == id) else {
            return;
        };
        self.state.documents.remove(index);
        if self.state.active_id == id {
            let fallback = index.saturating_sub(1);
            self.state.active_id = self.state.documents[fallback].id.clone();
        }
        self.persist();
    }

    /// Rename a document by id. No-op when the id is unknown.
    pub fn rename(&mut self, id: &str, name: &str) {
        if let Some(doc) = self.state.documents.iter_mut().find(|d| d.id == id) {
            doc.name = name.to_string();
            self.persist();
        }
    }

    /// Set the active pointer. No existence check: resolution self-heals
    /// at read time.
    pub fn set_active(&mut self, id: &str) {
        self.state.active_id = id.to_string();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.state) {
            warn!("Failed to save documents to storage: {}", e);
        }
    }
}
