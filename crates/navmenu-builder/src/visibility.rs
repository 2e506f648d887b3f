//! Login-state visibility rules.

use navmenu_model::NavItem;

/// Whether `item` is shown to a viewer with the given login state.
///
/// Items flagged `hideLoggedIn` are hidden from authenticated viewers and
/// items flagged `hideLoggedOut` from anonymous ones. An item with both flags
/// is never shown.
#[must_use]
pub fn should_include(item: &NavItem, is_authenticated: bool) -> bool {
    if item.hide_logged_in && is_authenticated {
        return false;
    }
    if item.hide_logged_out && !is_authenticated {
        return false;
    }
    true
}
