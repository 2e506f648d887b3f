//! Navigation item tree node and its JSON contract.
//!
//! [`NavItem`] is the persisted form of one menu entry as written by the
//! authoring UI. Field names follow the stored JSON (camelCase). Fields that
//! only exist while a menu is being built (resolved content, resolved image,
//! active state) are not part of this type; they live on the builder's
//! output type.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a navigation item.
///
/// Stored as a plain string so that integrators can register custom kinds
/// without touching this crate. Unknown values are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemType(String);

impl ItemType {
    /// Link to a content page.
    pub const DOCUMENT: &'static str = "Document";
    /// Link to a media item.
    pub const MEDIA: &'static str = "Media";
    /// Link to an external URL.
    pub const EXTERNAL: &'static str = "External";
    /// Plain text label without a link.
    pub const TITLE: &'static str = "Title";

    /// Create an item type from any string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn document() -> Self {
        Self::new(Self::DOCUMENT)
    }

    #[must_use]
    pub fn media() -> Self {
        Self::new(Self::MEDIA)
    }

    #[must_use]
    pub fn external() -> Self {
        Self::new(Self::EXTERNAL)
    }

    #[must_use]
    pub fn title() -> Self {
        Self::new(Self::TITLE)
    }

    /// Raw string value as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_document(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::DOCUMENT)
    }

    #[must_use]
    pub fn is_media(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::MEDIA)
    }

    #[must_use]
    pub fn is_external(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::EXTERNAL)
    }

    #[must_use]
    pub fn is_title(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::TITLE)
    }

    /// True for kinds whose `contentKey` is resolved against the CMS.
    #[must_use]
    pub fn is_content_backed(&self) -> bool {
        self.is_document() || self.is_media()
    }

    /// True for any kind outside the four built-in ones.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        !(self.is_content_backed() || self.is_external() || self.is_title())
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Reference to an image picked for an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub key: Uuid,
}

/// Culture-specific overrides for display text.
///
/// Keys are culture codes such as `en-US` or `fr-FR`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variants {
    #[serde(default)]
    pub name: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub description: Option<BTreeMap<String, String>>,
}

/// Look up a non-blank culture value.
fn variant<'a>(map: Option<&'a BTreeMap<String, String>>, culture: &str) -> Option<&'a str> {
    map?.get(culture)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

/// One node of the authored navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    /// Stable identifier assigned by the editor.
    #[serde(default)]
    pub key: Uuid,
    /// Display text. Required in the stored form, may be blank for content
    /// items whose name comes from the resolved page.
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub item_type: ItemType,
    /// Referenced document or media item.
    pub content_key: Option<Uuid>,
    pub anchor: Option<String>,
    /// Publish state of the resolved content. Output annotation only.
    pub published: Option<bool>,
    /// Zero-based depth, assigned when a menu is built. Ignored on input.
    #[serde(default, skip_deserializing)]
    pub level: u32,
    pub target: Option<String>,
    #[serde(rename = "image")]
    pub images: Option<Vec<ImageRef>>,
    pub custom_classes: Option<String>,
    #[serde(default)]
    pub hide_logged_in: bool,
    #[serde(default)]
    pub hide_logged_out: bool,
    pub noopener: Option<String>,
    pub noreferrer: Option<String>,
    /// Splice the resolved document's own child pages in as children.
    #[serde(default)]
    pub include_child_nodes: bool,
    pub variants: Option<Variants>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavItem>>,
}

impl NavItem {
    /// Create an item with a fresh random key and no optional fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            key: Uuid::new_v4(),
            name: name.into(),
            description: None,
            url: None,
            icon: None,
            item_type,
            content_key: None,
            anchor: None,
            published: None,
            level: 0,
            target: None,
            images: None,
            custom_classes: None,
            hide_logged_in: false,
            hide_logged_out: false,
            noopener: None,
            noreferrer: None,
            include_child_nodes: false,
            variants: None,
            children: None,
        }
    }

    /// External link item.
    #[must_use]
    pub fn external(name: impl Into<String>, url: impl Into<String>) -> Self {
        let mut item = Self::new(name, ItemType::external());
        item.url = Some(url.into());
        item
    }

    /// Document item pointing at `content_key`.
    #[must_use]
    pub fn document(name: impl Into<String>, content_key: Uuid) -> Self {
        let mut item = Self::new(name, ItemType::document());
        item.content_key = Some(content_key);
        item
    }

    /// Media item pointing at `content_key`.
    #[must_use]
    pub fn media(name: impl Into<String>, content_key: Uuid) -> Self {
        let mut item = Self::new(name, ItemType::media());
        item.content_key = Some(content_key);
        item
    }

    /// Text label item.
    #[must_use]
    pub fn title(name: impl Into<String>) -> Self {
        Self::new(name, ItemType::title())
    }

    #[must_use]
    pub fn with_key(mut self, key: Uuid) -> Self {
        self.key = key;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<NavItem>) -> Self {
        self.children = Some(children);
        self
    }

    /// Clone every field except `children`, which is left `None`.
    #[must_use]
    pub fn clone_without_children(&self) -> Self {
        Self {
            key: self.key,
            name: self.name.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            icon: self.icon.clone(),
            item_type: self.item_type.clone(),
            content_key: self.content_key,
            anchor: self.anchor.clone(),
            published: self.published,
            level: self.level,
            target: self.target.clone(),
            images: self.images.clone(),
            custom_classes: self.custom_classes.clone(),
            hide_logged_in: self.hide_logged_in,
            hide_logged_out: self.hide_logged_out,
            noopener: self.noopener.clone(),
            noreferrer: self.noreferrer.clone(),
            include_child_nodes: self.include_child_nodes,
            variants: self.variants.clone(),
            children: None,
        }
    }

    /// Authored children, empty when absent.
    #[must_use]
    pub fn children(&self) -> &[NavItem] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Name for `culture`, falling back to the invariant name.
    ///
    /// A variant that is missing or blank does not count.
    #[must_use]
    pub fn name_for(&self, culture: Option<&str>) -> &str {
        culture
            .and_then(|c| variant(self.variants.as_ref()?.name.as_ref(), c))
            .unwrap_or(self.name.as_str())
    }

    /// Description for `culture`, falling back to the invariant description.
    #[must_use]
    pub fn description_for(&self, culture: Option<&str>) -> Option<&str> {
        culture
            .and_then(|c| variant(self.variants.as_ref()?.description.as_ref(), c))
            .or(self.description.as_deref())
    }

    /// Depth-first, pre-order walk over this item and its authored descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Iterator returned by [`NavItem::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a NavItem>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a NavItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        self.stack.extend(item.children().iter().rev());
        Some(item)
    }
}
