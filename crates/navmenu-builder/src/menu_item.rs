//! Resolved menu item produced by the builder.
//!
//! [`MenuItem`] wraps the stored [`NavItem`] fields and adds the values that
//! only exist for one build: the resolved content, the resolved image, and
//! whether the item is the page being viewed. Those values are skipped when
//! serializing, and `MenuItem` has no `Deserialize` impl, so a resolved menu
//! cannot be written back as a stored tree by accident.

use navmenu_content::ContentRef;
use navmenu_model::NavItem;
use serde::Serialize;

/// One node of a resolved menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Stored fields after resolution and stripping. `item.children` is
    /// always `None`; resolved children live in [`MenuItem::children`].
    #[serde(flatten)]
    pub item: NavItem,
    /// Resolved children, `None` when there are none.
    pub children: Option<Vec<MenuItem>>,
    /// Content the item's `contentKey` resolved to.
    #[serde(skip)]
    pub content: Option<ContentRef>,
    /// Media the item's first image reference resolved to.
    #[serde(skip)]
    pub image: Option<ContentRef>,
    /// Whether the item's content is the page currently being viewed.
    #[serde(skip)]
    pub is_active: bool,
}

impl MenuItem {
    /// Start an output node from a stored item, without its children.
    #[must_use]
    pub(crate) fn from_stored(item: &NavItem) -> Self {
        Self {
            item: item.clone_without_children(),
            children: None,
            content: None,
            image: None,
            is_active: false,
        }
    }

    /// Resolved children, empty when absent.
    #[must_use]
    pub fn children(&self) -> &[MenuItem] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Whether the item renders as a link (everything except text labels).
    #[must_use]
    pub fn is_link(&self) -> bool {
        !self.item.item_type.is_title()
    }

    /// Link target.
    ///
    /// Documents use the resolved URL with the authored anchor appended;
    /// media use the resolved URL; everything else uses the authored `url`,
    /// or `#` when there is none.
    #[must_use]
    pub fn href(&self) -> String {
        match &self.content {
            Some(content) if content.is_document() => match self.item.anchor.as_deref() {
                Some(anchor) if !anchor.is_empty() => format!("{}{anchor}", content.url),
                _ => content.url.clone(),
            },
            Some(content) => content.url.clone(),
            None => self.item.url.clone().unwrap_or_else(|| "#".to_owned()),
        }
    }

    /// Value for the `rel` attribute built from `noopener` and `noreferrer`.
    #[must_use]
    pub fn rel(&self) -> Option<String> {
        let parts: Vec<&str> = [self.item.noopener.as_deref(), self.item.noreferrer.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Display name for `culture`.
    ///
    /// A non-blank culture variant wins, then the item's own name. A blank
    /// name falls back to the resolved content's name.
    #[must_use]
    pub fn display_name(&self, culture: Option<&str>) -> &str {
        let name = self.item.name_for(culture);
        match &self.content {
            Some(content) if name.trim().is_empty() => &content.name,
            _ => name,
        }
    }

    /// Description for `culture`.
    #[must_use]
    pub fn display_description(&self, culture: Option<&str>) -> Option<&str> {
        self.item.description_for(culture)
    }

    /// Whether this item or any of its descendants is the current page.
    ///
    /// Used to highlight the path to the active page in nested menus.
    #[must_use]
    pub fn is_active_trail(&self) -> bool {
        self.is_active || self.children().iter().any(MenuItem::is_active_trail)
    }

    /// Whether this item should be marked active while `current` is viewed.
    ///
    /// Items above `min_level` are never active. An item is active when its
    /// content is `current`, when `include_descendants` is set and `current`
    /// sits below its content in the content tree, or when any resolved
    /// child is active under the same rules.
    #[must_use]
    pub fn is_active_for(
        &self,
        current: &ContentRef,
        min_level: Option<u32>,
        include_descendants: bool,
    ) -> bool {
        if min_level.is_some_and(|min| self.item.level < min) {
            return false;
        }

        let key = self
            .item
            .content_key
            .or_else(|| self.content.as_ref().map(|content| content.key));
        if key == Some(current.key) {
            return true;
        }

        if include_descendants
            && let Some(content) = &self.content
            && current.is_descendant_of(content.key)
        {
            return true;
        }

        self.children()
            .iter()
            .any(|child| child.is_active_for(current, min_level, include_descendants))
    }

    /// Depth-first, pre-order walk over this item and its resolved
    /// descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Iterator returned by [`MenuItem::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a MenuItem>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a MenuItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        self.stack.extend(item.children().iter().rev());
        Some(item)
    }
}
