//! Menu resolution engine for navmenu.
//!
//! This crate provides:
//! - [`MenuBuilder`]: resolves a stored navigation tree into a [`MenuItem`]
//!   tree for one request
//! - [`should_include`]: login-state visibility rules
//! - [`apply_options`]: per-menu field stripping
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use std::sync::Arc;
//! use navmenu_builder::{MenuBuilder, RequestContext};
//! use navmenu_content::SnapshotResolver;
//! use navmenu_model::{BuildOptions, load_items};
//!
//! let resolver = Arc::new(SnapshotResolver::from_path(Path::new("content.json"))?);
//! let items = load_items(Path::new("main-menu.json"))?;
//!
//! let builder = MenuBuilder::new(resolver);
//! let menu = builder.build_menu(&items, BuildOptions::default(), &RequestContext::anonymous());
//!
//! for item in &menu {
//!     println!("{} -> {}", item.display_name(None), item.href());
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod menu_item;
mod visibility;

pub use builder::{BuildError, MenuBuilder, RequestContext, apply_options};
pub use menu_item::{MenuItem, Walk};
pub use visibility::should_include;
