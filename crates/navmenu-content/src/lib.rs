//! Content resolver abstraction for navmenu.
//!
//! This crate provides a [`ContentResolver`] trait for looking up live
//! documents and media referenced by navigation items. This enables:
//!
//! - **Unit testing** of menu building without a CMS
//! - **Backend flexibility** (snapshot files, a CMS cache, a database)
//! - **Clean separation** between tree resolution logic and content lookups
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentResolver`] trait with `resolve_document()` and `resolve_media()`
//! - [`SnapshotResolver`] implementation over a JSON export of the content tree
//! - [`MockResolver`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use navmenu_content::{ContentResolver, SnapshotResolver};
//!
//! let resolver = SnapshotResolver::from_path(Path::new("content.json"))?;
//! if let Some(page) = resolver.resolve_document(key)? {
//!     println!("{} -> {}", page.name, page.url);
//! }
//! ```

#[cfg(feature = "mock")]
mod mock;
mod resolver;
mod snapshot;

#[cfg(feature = "mock")]
pub use mock::MockResolver;
pub use resolver::{
    ContentError, ContentErrorKind, ContentKind, ContentLink, ContentRef, ContentResolver,
};
pub use snapshot::SnapshotResolver;
