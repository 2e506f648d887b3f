//! Content resolver trait and error types.
//!
//! Provides the [`ContentResolver`] trait the menu builder uses to look up
//! live documents and media, along with [`ContentError`] for collaborator
//! failures.
//!
//! # Miss vs. failure
//!
//! Resolver methods return `Result<Option<ContentRef>, ContentError>`:
//! - `Ok(Some(_))` - content exists and is retrievable
//! - `Ok(None)` - content was deleted or is not retrievable; callers exclude it
//! - `Err(_)` - the backend itself failed; callers abort the whole operation

use uuid::Uuid;

/// Kind of resolved content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Document,
    Media,
}

/// Visible child page of a resolved document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentLink {
    pub key: Uuid,
    pub name: String,
    pub url: String,
}

/// Live document or media item returned by a [`ContentResolver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentRef {
    /// Stable content identifier.
    pub key: Uuid,
    /// Display name.
    pub name: String,
    /// Canonical URL.
    pub url: String,
    pub kind: ContentKind,
    /// Publish state. Only reported for documents.
    pub published: Option<bool>,
    /// Visible child pages in the document's own order. Empty for media.
    pub children: Vec<ContentLink>,
    /// Keys of the documents above this one, root first. Empty for media
    /// and top-level documents.
    pub ancestors: Vec<Uuid>,
}

impl ContentRef {
    /// Create a published document reference without children.
    #[must_use]
    pub fn document(key: Uuid, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            url: url.into(),
            kind: ContentKind::Document,
            published: Some(true),
            children: Vec::new(),
            ancestors: Vec::new(),
        }
    }

    /// Create a media reference.
    #[must_use]
    pub fn media(key: Uuid, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            url: url.into(),
            kind: ContentKind::Media,
            published: None,
            children: Vec::new(),
            ancestors: Vec::new(),
        }
    }

    /// Set the ancestor chain, root first.
    #[must_use]
    pub fn with_ancestors(mut self, ancestors: Vec<Uuid>) -> Self {
        self.ancestors = ancestors;
        self
    }

    /// Whether `key` is one of this content's ancestors.
    #[must_use]
    pub fn is_descendant_of(&self, key: Uuid) -> bool {
        self.ancestors.contains(&key)
    }

    /// Whether this content is the page identified by `current`.
    #[must_use]
    pub fn is(&self, current: Option<Uuid>) -> bool {
        current == Some(self.key)
    }

    #[must_use]
    pub fn is_document(&self) -> bool {
        self.kind == ContentKind::Document
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentErrorKind {
    /// Content source does not exist.
    NotFound,
    /// Identifier could not be interpreted.
    InvalidKey,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Content source exists but its data is inconsistent.
    Corrupt,
    /// Other/unknown error category.
    Other,
}

/// Content lookup error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct ContentError {
    /// Semantic error category.
    pub kind: ContentErrorKind,
    /// Content key being looked up (if applicable).
    pub key: Option<Uuid>,
    /// Backend identifier (e.g., "Snapshot", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ContentError {
    /// Create a new content error.
    #[must_use]
    pub fn new(kind: ContentErrorKind) -> Self {
        Self {
            kind,
            key: None,
            backend: None,
            source: None,
        }
    }

    /// Attach the content key being resolved.
    #[must_use]
    pub fn with_key(mut self, key: Uuid) -> Self {
        self.key = Some(key);
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a content error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ContentErrorKind::NotFound,
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::ConnectionRefused => {
                ContentErrorKind::Unavailable
            }
            _ => ContentErrorKind::Other,
        };
        Self::new(kind).with_source(err)
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (key: <uuid>)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            ContentErrorKind::NotFound => "Not found",
            ContentErrorKind::InvalidKey => "Invalid key",
            ContentErrorKind::Unavailable => "Unavailable",
            ContentErrorKind::Corrupt => "Corrupt content",
            ContentErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(key) = &self.key {
            write!(f, " (key: {key})")?;
        }

        Ok(())
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Lookup of live documents and media by stable key.
///
/// Implementations are expected to cache on their side if lookups are
/// expensive; callers resolve each item once per build and do not
/// deduplicate.
pub trait ContentResolver: Send + Sync {
    /// Resolve a document (content page) by key.
    ///
    /// Returned references list the document's visible children.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the backend fails. A missing or
    /// unpublished document is `Ok(None)`, not an error.
    fn resolve_document(&self, key: Uuid) -> Result<Option<ContentRef>, ContentError>;

    /// Resolve a media item by key.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the backend fails. A missing media item is
    /// `Ok(None)`.
    fn resolve_media(&self, key: Uuid) -> Result<Option<ContentRef>, ContentError>;
}
