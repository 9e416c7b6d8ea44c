//! File previews
//!
//! A preview needs a short-lived URL pointing at the file's bytes. The
//! [`ObjectUrlStore`] hands those out and [`ObjectUrl`] gives the entry back
//! when dropped, so a preview holds its URL exactly as long as it is shown.

use bytes::Bytes;
use intake_core::models::CvAttachment;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::format::format_file_size;

const URL_SCHEME: &str = "blob:intake/";

/// In-memory table of live object URLs
#[derive(Debug, Clone, Default)]
pub struct ObjectUrlStore {
    entries: Arc<Mutex<HashMap<String, Bytes>>>,
}

impl ObjectUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Bytes>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register the file's bytes and return a handle that revokes on drop
    pub fn create(&self, file: &CvAttachment) -> ObjectUrl {
        let url = format!("{}{}", URL_SCHEME, Uuid::new_v4());
        self.entries().insert(url.clone(), file.content.clone());
        tracing::debug!(url = %url, file = %file.name, "Object URL created");
        ObjectUrl {
            url,
            store: self.clone(),
            revoked: false,
        }
    }

    pub fn resolve(&self, url: &str) -> Option<Bytes> {
        self.entries().get(url).cloned()
    }

    pub fn live_count(&self) -> usize {
        self.entries().len()
    }

    fn revoke(&self, url: &str) {
        if self.entries().remove(url).is_some() {
            tracing::debug!(url = %url, "Object URL revoked");
        }
    }
}

/// A live object URL. Revoked when dropped.
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
    store: ObjectUrlStore,
    revoked: bool,
}

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn revoke(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.revoked {
            self.store.revoke(&self.url);
            self.revoked = true;
        }
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.release();
    }
}

pub const PREVIEW_UNAVAILABLE: &str = "Preview not available for this file type";

/// What a preview pane renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    /// Document shown inline (PDF only)
    Embedded { url: String, title: String },
    /// Info card with a download link for everything else
    FileCard {
        name: String,
        size_text: String,
        download_url: String,
        note: &'static str,
    },
}

/// Preview of one attachment. Acquires its URL on construction and releases
/// it on drop or when the file is replaced.
#[derive(Debug)]
pub struct FilePreview {
    store: ObjectUrlStore,
    file: CvAttachment,
    url: ObjectUrl,
}

impl FilePreview {
    pub fn new(store: &ObjectUrlStore, file: CvAttachment) -> Self {
        let url = store.create(&file);
        Self {
            store: store.clone(),
            file,
            url,
        }
    }

    pub fn file(&self) -> &CvAttachment {
        &self.file
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Swap in a different file; the previous URL is revoked first.
    pub fn replace(&mut self, file: CvAttachment) {
        self.url.release();
        self.url = self.store.create(&file);
        self.file = file;
    }

    pub fn render(&self) -> PreviewContent {
        if self.file.is_pdf() {
            return PreviewContent::Embedded {
                url: self.url().to_string(),
                title: "CV Preview".to_string(),
            };
        }

        PreviewContent::FileCard {
            name: self.file.name.clone(),
            size_text: format_file_size(self.file.size),
            download_url: self.url().to_string(),
            note: PREVIEW_UNAVAILABLE,
        }
    }
}
