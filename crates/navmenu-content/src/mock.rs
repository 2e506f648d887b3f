//! Mock content resolver for testing.
//!
//! Provides [`MockResolver`] for unit testing without a content snapshot.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use crate::resolver::{ContentError, ContentErrorKind, ContentLink, ContentRef, ContentResolver};

/// Mock resolver for testing.
///
/// Stores documents and media in memory. Use the builder methods to
/// configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use navmenu_content::{ContentResolver, MockResolver};
/// use uuid::Uuid;
///
/// let home = Uuid::new_v4();
/// let about = Uuid::new_v4();
/// let resolver = MockResolver::new()
///     .with_document(home, "Home", "/")
///     .with_child(home, about, "About", "/about/");
///
/// let content = resolver.resolve_document(home).unwrap().unwrap();
/// assert_eq!(content.children.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockResolver {
    documents: HashMap<Uuid, ContentRef>,
    media: HashMap<Uuid, ContentRef>,
    failures: HashSet<Uuid>,
    lookups: AtomicUsize,
}

impl MockResolver {
    /// Create a new empty mock resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a published document.
    #[must_use]
    pub fn with_document(
        mut self,
        key: Uuid,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.documents
            .insert(key, ContentRef::document(key, name, url));
        self
    }

    /// Add a document that resolves but reports `published: false`.
    ///
    /// Mirrors backends that serve draft content in preview mode.
    #[must_use]
    pub fn with_draft_document(
        mut self,
        key: Uuid,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let mut content = ContentRef::document(key, name, url);
        content.published = Some(false);
        self.documents.insert(key, content);
        self
    }

    /// Add a visible child page under `parent` and register it as a document.
    ///
    /// # Panics
    ///
    /// Panics if `parent` has not been added with [`Self::with_document`].
    #[must_use]
    pub fn with_child(
        mut self,
        parent: Uuid,
        key: Uuid,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let url = url.into();
        let parent_ref = self
            .documents
            .get_mut(&parent)
            .expect("parent document must be added before its children");
        parent_ref.children.push(ContentLink {
            key,
            name: name.clone(),
            url: url.clone(),
        });
        let mut ancestors = parent_ref.ancestors.clone();
        ancestors.push(parent);
        self.documents.insert(
            key,
            ContentRef::document(key, name, url).with_ancestors(ancestors),
        );
        self
    }

    /// Add a media item.
    #[must_use]
    pub fn with_media(mut self, key: Uuid, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.media.insert(key, ContentRef::media(key, name, url));
        self
    }

    /// Make every lookup of `key` fail with [`ContentErrorKind::Unavailable`].
    #[must_use]
    pub fn with_failure(mut self, key: Uuid) -> Self {
        self.failures.insert(key);
        self
    }

    /// Total number of document and media lookups served so far.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    fn lookup(
        &self,
        map: &HashMap<Uuid, ContentRef>,
        key: Uuid,
    ) -> Result<Option<ContentRef>, ContentError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if self.failures.contains(&key) {
            return Err(ContentError::new(ContentErrorKind::Unavailable)
                .with_backend("Mock")
                .with_key(key));
        }
        Ok(map.get(&key).cloned())
    }
}

impl ContentResolver for MockResolver {
    fn resolve_document(&self, key: Uuid) -> Result<Option<ContentRef>, ContentError> {
        self.lookup(&self.documents, key)
    }

    fn resolve_media(&self, key: Uuid) -> Result<Option<ContentRef>, ContentError> {
        self.lookup(&self.media, key)
    }
}
