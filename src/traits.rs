//! Core traits that decouple tabshift from any specific browser transport.
//!
//! Every concrete backend (the native messaging bridge, a test harness, …)
//! implements [`Browser`].  The [`TabArranger`](crate::arranger::TabArranger)
//! only depends on this abstraction.

use crate::command::{ShortcutInfo, TabInfo, TabUpdate, WindowInfo};
use crate::geometry::{TabId, WindowId};

/// Abstraction over a browser that can list windows and tabs and move tabs
/// between windows.
///
/// An implementation might talk to a browser extension over native
/// messaging, or it might be an in-memory stub used in tests.
pub trait Browser {
    /// The error type produced by this browser.
    type Error: std::error::Error + Send + 'static;

    /// Return the window that most recently had focus.
    fn last_focused_window(&self) -> Result<WindowInfo, Self::Error>;

    /// Return every top-level window.
    fn windows(&self) -> Result<Vec<WindowInfo>, Self::Error>;

    /// Return the tabs of `window`, in tab-strip order.
    fn tabs(&self, window: WindowId) -> Result<Vec<TabInfo>, Self::Error>;

    /// Move `tabs` to the end of `window`'s tab strip.
    fn move_tabs(&self, tabs: &[TabId], window: WindowId) -> Result<(), Self::Error>;

    /// Create a new window containing `tab` and return its id.
    fn create_window(&self, tab: TabId, focused: bool) -> Result<WindowId, Self::Error>;

    /// Change the selection state of `tab`.
    ///
    /// Making a tab active resets the window's selection, so callers that
    /// want several highlighted tabs should activate at most one of them.
    fn update_tab(&self, tab: TabId, update: TabUpdate) -> Result<(), Self::Error>;

    /// Give `window` focus.
    fn focus_window(&self, window: WindowId) -> Result<(), Self::Error>;

    /// Return the commands registered for the extension with their key
    /// bindings.
    fn commands(&self) -> Result<Vec<ShortcutInfo>, Self::Error>;
}

/// Names of registered commands that ended up without a key binding.
///
/// The browser silently leaves a suggested shortcut unbound when it
/// conflicts with an existing one; an empty `shortcut` is how that shows up.
pub fn check_command_shortcuts(commands: &[ShortcutInfo]) -> Vec<String> {
    commands
        .iter()
        .filter(|c| c.shortcut.as_deref() == Some(""))
        .filter_map(|c| c.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortcut(name: Option<&str>, keys: Option<&str>) -> ShortcutInfo {
        ShortcutInfo {
            name: name.map(Into::into),
            shortcut: keys.map(Into::into),
        }
    }

    #[test]
    fn all_bound_reports_nothing() {
        let cmds = vec![
            shortcut(Some("detach-tab"), Some("Alt+Shift+D")),
            shortcut(Some("attach-left"), Some("Alt+Shift+Left")),
        ];
        assert!(check_command_shortcuts(&cmds).is_empty());
    }

    #[test]
    fn empty_shortcuts_are_reported_in_order() {
        let cmds = vec![
            shortcut(Some("detach-tab"), Some("")),
            shortcut(Some("attach-left"), Some("Alt+Shift+Left")),
            shortcut(Some("attach-up"), Some("")),
        ];
        assert_eq!(
            check_command_shortcuts(&cmds),
            vec!["detach-tab".to_string(), "attach-up".to_string()]
        );
    }

    #[test]
    fn unnamed_or_unknown_bindings_are_ignored() {
        let cmds = vec![shortcut(None, Some("")), shortcut(Some("attach-down"), None)];
        assert!(check_command_shortcuts(&cmds).is_empty());
    }
}
