//! Menu resolution.
//!
//! [`MenuBuilder`] turns a stored navigation tree into the tree that gets
//! rendered for one request. Per level, each item goes through:
//!
//! 1. visibility filtering against the [`RequestContext`]
//! 2. content resolution (items whose content is gone are dropped)
//! 3. image resolution
//! 4. field stripping per [`BuildOptions`]
//! 5. depth truncation, child page expansion and recursion
//!
//! The stored tree is only borrowed. Every surviving node is cloned into a
//! fresh [`MenuItem`], so one parsed tree can back any number of concurrent
//! builds.
//!
//! # Failure
//!
//! A resolver error anywhere in the tree fails the whole build.
//! [`MenuBuilder::try_build_menu`] returns it; [`MenuBuilder::build_menu`]
//! logs it and returns an empty menu instead of a partial one.

use std::sync::Arc;

use navmenu_content::{ContentError, ContentRef, ContentResolver};
use navmenu_model::{BuildOptions, NavItem};
use uuid::Uuid;

use crate::menu_item::MenuItem;
use crate::visibility::should_include;

/// Per-request facts the builder needs about the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Whether the viewer is logged in.
    pub is_authenticated: bool,
    /// Key of the page being rendered, used to mark active items.
    pub current_content_key: Option<Uuid>,
}

impl RequestContext {
    /// Anonymous viewer with no current page.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Logged-in viewer with no current page.
    #[must_use]
    pub fn authenticated() -> Self {
        Self {
            is_authenticated: true,
            current_content_key: None,
        }
    }

    /// Set the page being rendered.
    #[must_use]
    pub fn with_current(mut self, key: Uuid) -> Self {
        self.current_content_key = Some(key);
        self
    }
}

/// Error aborting a menu build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The resolver failed while resolving content or an image for an item.
    #[error("Content resolution failed for item {item}: {source}")]
    Resolve {
        item: Uuid,
        #[source]
        source: ContentError,
    },
}

/// Clear the fields `options` asks to remove.
///
/// Applying the same options twice is the same as applying them once.
pub fn apply_options(item: &mut NavItem, options: &BuildOptions) {
    if options.remove_noopener {
        item.noopener = None;
    }
    if options.remove_noreferrer {
        item.noreferrer = None;
    }
    if options.remove_description {
        item.description = None;
    }
    if options.remove_custom_classes {
        item.custom_classes = None;
    }
    if options.remove_images {
        item.images = None;
    }
}

/// Outcome of looking up an item's `contentKey`.
enum Resolution {
    /// Nothing to resolve: no key, or a kind that is not content-backed.
    Unresolved,
    /// Key set but the content no longer exists.
    Missing,
    Content(ContentRef),
}

/// Resolves stored navigation trees into menus.
///
/// The builder holds no per-build state and can be shared between threads.
pub struct MenuBuilder {
    resolver: Arc<dyn ContentResolver>,
}

impl MenuBuilder {
    /// Create a builder over a content resolver.
    #[must_use]
    pub fn new(resolver: Arc<dyn ContentResolver>) -> Self {
        Self { resolver }
    }

    /// Build the menu for one request.
    ///
    /// Returns an empty menu if the resolver fails; the error is logged.
    #[must_use]
    pub fn build_menu(
        &self,
        items: &[NavItem],
        options: BuildOptions,
        ctx: &RequestContext,
    ) -> Vec<MenuItem> {
        match self.try_build_menu(items, options, ctx) {
            Ok(menu) => menu,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build menu");
                Vec::new()
            }
        }
    }

    /// Build the menu for one request, returning resolver failures.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Resolve`] if the resolver fails for any item.
    /// Items whose content is missing are dropped and are not errors.
    pub fn try_build_menu(
        &self,
        items: &[NavItem],
        options: BuildOptions,
        ctx: &RequestContext,
    ) -> Result<Vec<MenuItem>, BuildError> {
        let pass = Pass {
            resolver: self.resolver.as_ref(),
            options,
            ctx: *ctx,
        };
        let items: Vec<&NavItem> = items.iter().collect();
        let menu = pass.process_items(&items, 0)?;
        tracing::debug!(items = menu.len(), "Built menu");
        Ok(menu)
    }
}

/// State of one `try_build_menu` call.
struct Pass<'a> {
    resolver: &'a dyn ContentResolver,
    options: BuildOptions,
    ctx: RequestContext,
}

impl Pass<'_> {
    fn process_items(&self, items: &[&NavItem], level: u32) -> Result<Vec<MenuItem>, BuildError> {
        let mut menu = Vec::with_capacity(items.len());
        for item in items {
            if let Some(node) = self.process_item(item, level)? {
                menu.push(node);
            }
        }
        Ok(menu)
    }

    fn process_item(&self, stored: &NavItem, level: u32) -> Result<Option<MenuItem>, BuildError> {
        if !should_include(stored, self.ctx.is_authenticated) {
            return Ok(None);
        }

        let mut node = MenuItem::from_stored(stored);

        match self.resolve_content(stored)? {
            Resolution::Unresolved => {}
            Resolution::Missing => {
                tracing::debug!(key = %stored.key, "Dropping item with missing content");
                return Ok(None);
            }
            Resolution::Content(content) => {
                if node.item.name.trim().is_empty() {
                    node.item.name.clone_from(&content.name);
                }
                node.item.url = Some(content.url.clone());
                if content.published.is_some() {
                    node.item.published = content.published;
                }
                node.is_active = content.is(self.ctx.current_content_key);
                node.content = Some(content);
            }
        }

        if !self.options.remove_images {
            node.image = self.resolve_image(&node.item)?;
        }

        apply_options(&mut node.item, &self.options);

        if !self.options.is_leaf_level(level) {
            let synthetic = self.child_pages(stored, node.content.as_ref());
            let combined: Vec<&NavItem> = stored.children().iter().chain(&synthetic).collect();
            if !combined.is_empty() {
                let children = self.process_items(&combined, level + 1)?;
                if !children.is_empty() {
                    node.children = Some(children);
                }
            }
        }

        node.item.level = level;
        Ok(Some(node))
    }

    fn resolve_content(&self, item: &NavItem) -> Result<Resolution, BuildError> {
        let Some(key) = item.content_key else {
            return Ok(Resolution::Unresolved);
        };

        let result = if item.item_type.is_media() {
            self.resolver.resolve_media(key)
        } else if item.item_type.is_document() {
            self.resolver.resolve_document(key)
        } else {
            return Ok(Resolution::Unresolved);
        };

        let content = result.map_err(|source| BuildError::Resolve {
            item: item.key,
            source,
        })?;
        Ok(content.map_or(Resolution::Missing, Resolution::Content))
    }

    /// Resolve the first image reference. A missing image is not an error.
    fn resolve_image(&self, item: &NavItem) -> Result<Option<ContentRef>, BuildError> {
        let Some(image) = item.images.as_deref().and_then(<[_]>::first) else {
            return Ok(None);
        };
        if image.key.is_nil() {
            return Ok(None);
        }

        self.resolver
            .resolve_media(image.key)
            .map_err(|source| BuildError::Resolve {
                item: item.key,
                source,
            })
    }

    /// Synthetic items for the resolved document's own child pages.
    fn child_pages(&self, stored: &NavItem, content: Option<&ContentRef>) -> Vec<NavItem> {
        if self.options.hide_include_children || !stored.include_child_nodes {
            return Vec::new();
        }
        let Some(content) = content.filter(|c| c.is_document()) else {
            return Vec::new();
        };

        content
            .children
            .iter()
            .map(|page| {
                let mut item = NavItem::document(page.name.clone(), page.key).with_key(page.key);
                item.url = Some(page.url.clone());
                item
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use navmenu_content::{ContentErrorKind, MockResolver};
    use navmenu_model::{ImageRef, ItemType, parse_items};
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(MenuBuilder: Send, Sync);

    fn key(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn build(resolver: MockResolver, items: &[NavItem], options: BuildOptions) -> Vec<MenuItem> {
        MenuBuilder::new(Arc::new(resolver)).build_menu(
            items,
            options,
            &RequestContext::anonymous(),
        )
    }

    /// Resolver handle for a builder while the test keeps the mock for counts.
    fn shared(resolver: &Arc<MockResolver>) -> Arc<dyn ContentResolver> {
        Arc::<MockResolver>::clone(resolver)
    }

    fn names(menu: &[MenuItem]) -> Vec<&str> {
        menu.iter().map(|item| item.item.name.as_str()).collect()
    }

    fn max_depth(depth: u32) -> BuildOptions {
        BuildOptions {
            max_depth: depth,
            ..Default::default()
        }
    }

    /// Title chain `depth` levels deep with two items per level.
    fn deep_tree(depth: u32) -> Vec<NavItem> {
        let mut level = vec![NavItem::title("leaf-a"), NavItem::title("leaf-b")];
        for n in (0..depth.saturating_sub(1)).rev() {
            level = vec![
                NavItem::title(format!("node-{n}")).with_children(level),
                NavItem::title(format!("sibling-{n}")),
            ];
        }
        level
    }

    #[test]
    fn test_external_item_passes_through() {
        let items =
            parse_items(r#"[{"name": "Home", "itemType": "External", "url": "/", "children": []}]"#)
                .unwrap();

        let menu = build(MockResolver::new(), &items, BuildOptions::default());
        let value = serde_json::to_value(&menu).unwrap();

        assert_eq!(menu.len(), 1);
        assert_eq!(value[0]["name"], "Home");
        assert_eq!(value[0]["itemType"], "External");
        assert_eq!(value[0]["url"], "/");
        assert_eq!(value[0]["level"], 0);
        assert!(value[0]["children"].is_null());
    }

    #[test]
    fn test_missing_document_is_dropped() {
        let items = vec![NavItem::document("Gone", key(1))];

        let menu = build(MockResolver::new(), &items, BuildOptions::default());

        assert!(menu.is_empty());
    }

    #[test]
    fn test_missing_media_is_dropped_with_siblings_kept() {
        let items = vec![
            NavItem::external("Before", "/before"),
            NavItem::media("Gone", key(1)),
            NavItem::external("After", "/after"),
        ];

        let menu = build(MockResolver::new(), &items, BuildOptions::default());

        assert_eq!(names(&menu), vec!["Before", "After"]);
    }

    #[test]
    fn test_max_depth_one_strips_children() {
        let items = parse_items(r#"[{"name": "Parent", "children": [{"name": "Child"}]}]"#).unwrap();

        let menu = build(MockResolver::new(), &items, max_depth(1));

        assert_eq!(names(&menu), vec!["Parent"]);
        assert_eq!(menu[0].item.level, 0);
        assert_eq!(menu[0].children, None);
    }

    #[test]
    fn test_hide_logged_in_depends_on_viewer() {
        let mut item = NavItem::external("Login", "/login");
        item.hide_logged_in = true;
        let items = vec![item];
        let builder = MenuBuilder::new(Arc::new(MockResolver::new()));

        let authenticated =
            builder.build_menu(&items, BuildOptions::default(), &RequestContext::authenticated());
        let anonymous =
            builder.build_menu(&items, BuildOptions::default(), &RequestContext::anonymous());

        assert!(authenticated.is_empty());
        assert_eq!(names(&anonymous), vec!["Login"]);
    }

    #[test]
    fn test_include_child_nodes_appends_after_authored() {
        let resolver = MockResolver::new()
            .with_document(key(1), "Products", "/products/")
            .with_child(key(1), key(2), "Widgets", "/products/widgets/")
            .with_child(key(1), key(3), "Gadgets", "/products/gadgets/");
        let mut parent = NavItem::document("Products", key(1))
            .with_children(vec![NavItem::external("Catalog", "/catalog.pdf")]);
        parent.include_child_nodes = true;

        let menu = build(resolver, &[parent], BuildOptions::default());

        let children = menu[0].children();
        assert_eq!(names(children), vec!["Catalog", "Widgets", "Gadgets"]);
        assert!(children.iter().all(|child| child.item.level == 1));
        assert_eq!(children[1].item.key, key(2));
        assert_eq!(children[1].item.content_key, Some(key(2)));
        assert_eq!(children[1].item.item_type, ItemType::document());
        assert_eq!(children[1].item.url.as_deref(), Some("/products/widgets/"));
        assert_eq!(children[2].item.url.as_deref(), Some("/products/gadgets/"));
    }

    #[test]
    fn test_hide_include_children_skips_expansion() {
        let resolver = MockResolver::new()
            .with_document(key(1), "Products", "/products/")
            .with_child(key(1), key(2), "Widgets", "/products/widgets/");
        let mut parent = NavItem::document("Products", key(1));
        parent.include_child_nodes = true;
        let options = BuildOptions {
            hide_include_children: true,
            ..Default::default()
        };

        let menu = build(resolver, &[parent], options);

        assert_eq!(menu[0].children, None);
    }

    #[test]
    fn test_media_item_does_not_expand() {
        let resolver = MockResolver::new().with_media(key(1), "Brochure", "/media/brochure.pdf");
        let mut item = NavItem::media("Brochure", key(1));
        item.include_child_nodes = true;

        let menu = build(resolver, &[item], BuildOptions::default());

        assert_eq!(menu[0].children, None);
        assert_eq!(menu[0].href(), "/media/brochure.pdf");
    }

    #[test]
    fn test_expansion_stops_at_max_depth() {
        let resolver = MockResolver::new()
            .with_document(key(1), "Products", "/products/")
            .with_child(key(1), key(2), "Widgets", "/products/widgets/");
        let mut parent = NavItem::document("Products", key(1));
        parent.include_child_nodes = true;

        let menu = build(resolver, &[parent], max_depth(1));

        assert_eq!(menu[0].children, None);
    }

    #[test]
    fn test_remove_noopener() {
        let mut item = NavItem::external("Partner", "https://partner.example");
        item.noopener = Some("noopener".to_owned());
        item.noreferrer = Some("noreferrer".to_owned());
        let options = BuildOptions {
            remove_noopener: true,
            ..Default::default()
        };

        let menu = build(MockResolver::new(), &[item], options);
        let value = serde_json::to_value(&menu).unwrap();

        assert!(value[0]["noopener"].is_null());
        assert_eq!(value[0]["noreferrer"], "noreferrer");
    }

    #[test]
    fn test_stripping_applies_to_unresolved_items() {
        let mut item = NavItem::title("Label");
        item.description = Some("text".to_owned());
        item.custom_classes = Some("highlight".to_owned());
        let options = BuildOptions {
            remove_description: true,
            remove_custom_classes: true,
            ..Default::default()
        };

        let menu = build(MockResolver::new(), &[item], options);

        assert_eq!(menu[0].item.description, None);
        assert_eq!(menu[0].item.custom_classes, None);
    }

    #[test]
    fn test_apply_options_is_idempotent() {
        let mut item = NavItem::external("Partner", "https://partner.example");
        item.noopener = Some("noopener".to_owned());
        item.noreferrer = Some("noreferrer".to_owned());
        item.description = Some("text".to_owned());
        item.custom_classes = Some("c".to_owned());
        item.images = Some(vec![ImageRef { key: key(9) }]);

        let all = BuildOptions {
            remove_noopener: true,
            remove_noreferrer: true,
            remove_description: true,
            remove_custom_classes: true,
            remove_images: true,
            ..Default::default()
        };
        for options in [BuildOptions::default(), all] {
            let mut once = item.clone();
            apply_options(&mut once, &options);
            let mut twice = once.clone();
            apply_options(&mut twice, &options);

            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_resolved_document_fills_fields() {
        let resolver = MockResolver::new().with_document(key(1), "About us", "/about/");
        let items = vec![NavItem::document("  ", key(1)), NavItem::document("Team", key(1))];
        let ctx = RequestContext::anonymous().with_current(key(1));

        let menu = MenuBuilder::new(Arc::new(resolver)).build_menu(
            &items,
            BuildOptions::default(),
            &ctx,
        );

        assert_eq!(names(&menu), vec!["About us", "Team"]);
        assert_eq!(menu[0].item.url.as_deref(), Some("/about/"));
        assert_eq!(menu[0].item.published, Some(true));
        assert!(menu[0].is_active);
        assert_eq!(menu[0].content.as_ref().map(|c| c.key), Some(key(1)));
    }

    #[test]
    fn test_draft_document_reports_unpublished() {
        let resolver = MockResolver::new().with_draft_document(key(1), "Draft", "/draft/");

        let menu = build(resolver, &[NavItem::document("Draft", key(1))], BuildOptions::default());

        assert_eq!(menu[0].item.published, Some(false));
    }

    #[test]
    fn test_is_active_only_for_current_page() {
        let resolver = MockResolver::new()
            .with_document(key(1), "Home", "/")
            .with_child(key(1), key(2), "About", "/about/");
        let mut home = NavItem::document("Home", key(1));
        home.include_child_nodes = true;
        let ctx = RequestContext::anonymous().with_current(key(2));

        let menu = MenuBuilder::new(Arc::new(resolver)).build_menu(
            &[home],
            BuildOptions::default(),
            &ctx,
        );

        assert!(!menu[0].is_active);
        assert!(menu[0].children()[0].is_active);
        assert!(menu[0].is_active_trail());
    }

    #[test]
    fn test_stray_content_key_on_external_is_not_resolved() {
        let resolver = Arc::new(MockResolver::new());
        let mut item = NavItem::external("Docs", "https://docs.example");
        item.content_key = Some(key(1));

        let menu = MenuBuilder::new(shared(&resolver)).build_menu(
            &[item],
            BuildOptions::default(),
            &RequestContext::anonymous(),
        );

        assert_eq!(menu[0].item.url.as_deref(), Some("https://docs.example"));
        assert_eq!(resolver.lookup_count(), 0);
    }

    #[test]
    fn test_document_type_is_case_insensitive() {
        let resolver = MockResolver::new().with_document(key(1), "Home", "/home/");
        let mut item = NavItem::new("Home", ItemType::new("document"));
        item.content_key = Some(key(1));

        let menu = build(resolver, &[item], BuildOptions::default());

        assert_eq!(menu[0].item.url.as_deref(), Some("/home/"));
    }

    #[test]
    fn test_custom_item_type_round_trips() {
        let item = NavItem::new("Search", ItemType::new("SearchBox"));

        let menu = build(MockResolver::new(), &[item], BuildOptions::default());
        let value = serde_json::to_value(&menu).unwrap();

        assert_eq!(value[0]["itemType"], "SearchBox");
    }

    #[test]
    fn test_image_resolved_from_first_reference() {
        let resolver = MockResolver::new()
            .with_media(key(10), "Icon", "/media/icon.svg")
            .with_media(key(11), "Other", "/media/other.svg");
        let mut item = NavItem::title("Label");
        item.images = Some(vec![ImageRef { key: key(10) }, ImageRef { key: key(11) }]);

        let menu = build(resolver, &[item], BuildOptions::default());

        assert_eq!(menu[0].image.as_ref().map(|i| i.key), Some(key(10)));
    }

    #[test]
    fn test_missing_image_is_silent() {
        let mut item = NavItem::title("Label");
        item.images = Some(vec![ImageRef { key: key(10) }]);

        let menu = build(MockResolver::new(), &[item], BuildOptions::default());

        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].image, None);
        assert!(menu[0].item.images.is_some());
    }

    #[test]
    fn test_nil_image_key_is_not_looked_up() {
        let resolver = Arc::new(MockResolver::new());
        let mut item = NavItem::title("Label");
        item.images = Some(vec![ImageRef { key: Uuid::nil() }]);

        let menu = MenuBuilder::new(shared(&resolver)).build_menu(
            &[item],
            BuildOptions::default(),
            &RequestContext::anonymous(),
        );

        assert_eq!(menu[0].image, None);
        assert_eq!(resolver.lookup_count(), 0);
    }

    #[test]
    fn test_remove_images_skips_lookup() {
        let resolver = Arc::new(MockResolver::new().with_media(key(10), "Icon", "/icon.svg"));
        let mut item = NavItem::title("Label");
        item.images = Some(vec![ImageRef { key: key(10) }]);
        let options = BuildOptions {
            remove_images: true,
            ..Default::default()
        };

        let menu = MenuBuilder::new(shared(&resolver)).build_menu(
            &[item],
            options,
            &RequestContext::anonymous(),
        );

        assert_eq!(menu[0].image, None);
        assert_eq!(menu[0].item.images, None);
        assert_eq!(resolver.lookup_count(), 0);
    }

    #[test]
    fn test_one_lookup_per_item() {
        let resolver = Arc::new(
            MockResolver::new()
                .with_document(key(1), "Home", "/")
                .with_document(key(2), "About", "/about/")
                .with_media(key(10), "Icon", "/icon.svg"),
        );
        let mut about = NavItem::document("About", key(2));
        about.images = Some(vec![ImageRef { key: key(10) }]);
        let items = vec![
            NavItem::document("Home", key(1)).with_children(vec![about]),
            NavItem::external("Elsewhere", "https://example.com"),
        ];

        let _ = MenuBuilder::new(shared(&resolver)).build_menu(
            &items,
            BuildOptions::default(),
            &RequestContext::anonymous(),
        );

        // Two documents and one image
        assert_eq!(resolver.lookup_count(), 3);
    }

    #[test]
    fn test_resolver_failure_empties_whole_menu() {
        let resolver = MockResolver::new()
            .with_document(key(1), "Home", "/")
            .with_document(key(2), "Broken", "/broken/")
            .with_failure(key(2));
        let items = vec![
            NavItem::document("Home", key(1)),
            NavItem::external("Docs", "/docs"),
            NavItem::title("Section").with_children(vec![NavItem::document("Broken", key(2))]),
        ];

        let menu = build(resolver, &items, BuildOptions::default());

        assert!(menu.is_empty());
    }

    #[test]
    fn test_try_build_menu_returns_failure() {
        let resolver = MockResolver::new().with_failure(key(10));
        let mut item = NavItem::title("Label").with_key(key(5));
        item.images = Some(vec![ImageRef { key: key(10) }]);

        let err = MenuBuilder::new(Arc::new(resolver))
            .try_build_menu(&[item], BuildOptions::default(), &RequestContext::anonymous())
            .unwrap_err();

        let BuildError::Resolve { item, source } = err;
        assert_eq!(item, key(5));
        assert_eq!(source.kind, ContentErrorKind::Unavailable);
    }

    #[test]
    fn test_input_tree_is_not_mutated() {
        let resolver = MockResolver::new()
            .with_document(key(1), "Products", "/products/")
            .with_child(key(1), key(2), "Widgets", "/products/widgets/");
        let mut parent = NavItem::document("", key(1))
            .with_children(vec![NavItem::external("Catalog", "/catalog.pdf")]);
        parent.include_child_nodes = true;
        parent.noopener = Some("noopener".to_owned());
        let items = vec![parent];
        let before = items.clone();
        let options = BuildOptions {
            remove_noopener: true,
            ..Default::default()
        };

        let menu = build(resolver, &items, options);

        assert_eq!(items, before);
        assert_eq!(menu[0].item.name, "Products");
        assert_eq!(menu[0].item.children, None);
    }

    #[test]
    fn test_levels_follow_depth() {
        let items = deep_tree(4);

        let menu = build(MockResolver::new(), &items, BuildOptions::default());

        for root in &menu {
            for item in root.walk() {
                assert!(item.item.level < 4);
                for child in item.children() {
                    assert_eq!(child.item.level, item.item.level + 1);
                }
            }
        }
        assert_eq!(menu.iter().flat_map(MenuItem::walk).count(), 8);
    }

    #[test]
    fn test_no_item_reaches_max_depth() {
        let items = deep_tree(6);

        for depth in 1..=6 {
            let menu = build(MockResolver::new(), &items, max_depth(depth));

            let deepest = menu
                .iter()
                .flat_map(MenuItem::walk)
                .map(|item| item.item.level)
                .max()
                .unwrap();
            assert_eq!(deepest, depth - 1);
        }
    }

    #[test]
    fn test_hidden_subtree_is_absent() {
        let mut members = NavItem::title("Members").with_children(vec![
            NavItem::external("Profile", "/profile"),
            NavItem::external("Billing", "/billing"),
        ]);
        members.hide_logged_in = true;
        let items = vec![NavItem::title("Root").with_children(vec![members])];
        let builder = MenuBuilder::new(Arc::new(MockResolver::new()));

        let menu =
            builder.build_menu(&items, BuildOptions::default(), &RequestContext::authenticated());

        let all: Vec<&str> = menu
            .iter()
            .flat_map(MenuItem::walk)
            .map(|item| item.item.name.as_str())
            .collect();
        assert_eq!(all, vec!["Root"]);
        assert_eq!(menu[0].children, None);
    }

    #[test]
    fn test_order_is_preserved() {
        let items: Vec<NavItem> = (0..20)
            .map(|n| NavItem::external(format!("item-{n}"), format!("/{n}")))
            .collect();

        let menu = build(MockResolver::new(), &items, BuildOptions::default());

        let expected: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names(&menu), expected);
    }

    #[test]
    fn test_concurrent_builds_share_tree() {
        let resolver = MockResolver::new()
            .with_document(key(1), "Products", "/products/")
            .with_child(key(1), key(2), "Widgets", "/products/widgets/");
        let mut parent = NavItem::document("Products", key(1));
        parent.include_child_nodes = true;
        let items = Arc::new(vec![parent, NavItem::external("Docs", "/docs")]);
        let builder = Arc::new(MenuBuilder::new(Arc::new(resolver)));
        let expected = builder.build_menu(&items, BuildOptions::default(), &RequestContext::anonymous());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let items = Arc::clone(&items);
                let builder = Arc::clone(&builder);
                thread::spawn(move || {
                    let ctx = if i % 2 == 0 {
                        RequestContext::anonymous()
                    } else {
                        RequestContext::anonymous().with_current(key(2))
                    };
                    builder.build_menu(&items, BuildOptions::default(), &ctx)
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let menu = handle.join().unwrap();
            assert_eq!(names(&menu), names(&expected));
            assert_eq!(menu[0].children()[0].is_active, i % 2 == 1);
        }
        assert_eq!(items[0].children, None);
    }
}
