//! The page the controllers render into

pub mod document;
pub mod ids;
pub mod snapshot;

use std::sync::{Arc, Mutex, PoisonError};

pub use document::{Cell, Display, Document, Element, PageLayout, RenderError, TableRow};

/// Shared handle to the live document.
///
/// The lock is only ever held inside `read`/`update`, never across an await.
#[derive(Debug, Clone, Default)]
pub struct Page {
    document: Arc<Mutex<Document>>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let guard = self.document.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut guard = self.document.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Copy of the document as it is right now
    pub fn snapshot(&self) -> Document {
        self.read(Document::clone)
    }
}
