//! Content resolver backed by a JSON snapshot of the content tree.
//!
//! A snapshot is an export of the published content tree:
//!
//! ```json
//! {
//!   "documents": [
//!     {"key": "…", "name": "Home", "url": "/", "children": [
//!       {"key": "…", "name": "About", "url": "/about/", "visible": false}
//!     ]}
//!   ],
//!   "media": [{"key": "…", "name": "Logo", "url": "/media/logo.png"}]
//! }
//! ```
//!
//! `published` and `visible` default to `true`. Unpublished documents do not
//! resolve; hidden documents resolve but are left out of their parent's
//! child list. Every document records the keys of its ancestors, so a
//! resolved page knows which sections it sits under.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;

use crate::resolver::{
    ContentError, ContentErrorKind, ContentKind, ContentLink, ContentRef, ContentResolver,
};

/// Backend identifier for error messages.
const BACKEND: &str = "Snapshot";

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    documents: Vec<DocumentEntry>,
    #[serde(default)]
    media: Vec<MediaEntry>,
}

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    key: Uuid,
    name: String,
    url: String,
    #[serde(default = "default_true")]
    published: bool,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    children: Vec<DocumentEntry>,
}

#[derive(Debug, Deserialize)]
struct MediaEntry {
    key: Uuid,
    name: String,
    url: String,
}

#[derive(Debug)]
struct DocumentRecord {
    name: String,
    url: String,
    published: bool,
    visible: bool,
    children: Vec<Uuid>,
    ancestors: Vec<Uuid>,
}

/// Read-only resolver over an in-memory index of a content snapshot.
///
/// The snapshot is indexed once at load time; lookups are `HashMap` hits and
/// never fail.
#[derive(Debug, Default)]
pub struct SnapshotResolver {
    documents: HashMap<Uuid, DocumentRecord>,
    media: HashMap<Uuid, ContentRef>,
}

impl SnapshotResolver {
    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the file can't be read, isn't valid
    /// snapshot JSON, or contains the same key twice.
    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ContentError::io(e).with_backend(BACKEND))?;
        let resolver = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            documents = resolver.documents.len(),
            media = resolver.media.len(),
            "Loaded content snapshot"
        );
        Ok(resolver)
    }

    /// Load a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] with [`ContentErrorKind::Corrupt`] for invalid
    /// JSON or duplicate keys, and [`ContentErrorKind::InvalidKey`] for an
    /// entry keyed by the nil UUID.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let file: SnapshotFile = serde_json::from_str(json).map_err(|e| {
            ContentError::new(ContentErrorKind::Corrupt)
                .with_backend(BACKEND)
                .with_source(e)
        })?;

        let mut resolver = Self::default();
        for entry in file.documents {
            resolver.index_document(entry, &[])?;
        }
        for entry in file.media {
            require_key(entry.key)?;
            let content = ContentRef::media(entry.key, entry.name, entry.url);
            if resolver.media.insert(entry.key, content).is_some() {
                return Err(duplicate_key(entry.key));
            }
        }

        Ok(resolver)
    }

    /// Number of indexed documents (including unpublished ones).
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of indexed media items.
    #[must_use]
    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    /// Flatten a document subtree into the index, returning the entry's key.
    fn index_document(
        &mut self,
        entry: DocumentEntry,
        ancestors: &[Uuid],
    ) -> Result<Uuid, ContentError> {
        let key = require_key(entry.key)?;
        let mut path = ancestors.to_vec();
        path.push(key);
        let mut children = Vec::with_capacity(entry.children.len());
        for child in entry.children {
            children.push(self.index_document(child, &path)?);
        }

        let record = DocumentRecord {
            name: entry.name,
            url: entry.url,
            published: entry.published,
            visible: entry.visible,
            children,
            ancestors: ancestors.to_vec(),
        };
        if self.documents.insert(key, record).is_some() {
            return Err(duplicate_key(key));
        }

        Ok(key)
    }

    /// Visible, published children of a document in authored order.
    fn visible_children(&self, record: &DocumentRecord) -> Vec<ContentLink> {
        record
            .children
            .iter()
            .filter_map(|key| {
                let child = self.documents.get(key)?;
                (child.published && child.visible).then(|| ContentLink {
                    key: *key,
                    name: child.name.clone(),
                    url: child.url.clone(),
                })
            })
            .collect()
    }
}

fn require_key(key: Uuid) -> Result<Uuid, ContentError> {
    if key.is_nil() {
        return Err(ContentError::new(ContentErrorKind::InvalidKey)
            .with_backend(BACKEND)
            .with_key(key));
    }
    Ok(key)
}

fn duplicate_key(key: Uuid) -> ContentError {
    ContentError::new(ContentErrorKind::Corrupt)
        .with_backend(BACKEND)
        .with_key(key)
}

impl ContentResolver for SnapshotResolver {
    fn resolve_document(&self, key: Uuid) -> Result<Option<ContentRef>, ContentError> {
        let Some(record) = self.documents.get(&key) else {
            return Ok(None);
        };
        if !record.published {
            return Ok(None);
        }

        Ok(Some(ContentRef {
            key,
            name: record.name.clone(),
            url: record.url.clone(),
            kind: ContentKind::Document,
            published: Some(record.published),
            children: self.visible_children(record),
            ancestors: record.ancestors.clone(),
        }))
    }

    fn resolve_media(&self, key: Uuid) -> Result<Option<ContentRef>, ContentError> {
        Ok(self.media.get(&key).cloned())
    }
}
