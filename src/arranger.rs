//! The orchestrator that ties window selection and the browser together.
//!
//! [`TabArranger`] reacts to [`Command`]s by querying the [`Browser`] for a
//! window snapshot, deciding what to do with the pure functions in
//! [`order`](crate::order), and only then issuing the mutating calls.  A
//! geometry error therefore never leaves tabs half-moved.

use crate::command::{Command, Direction, TabUpdate};
use crate::geometry::{GeometryError, TabId, WindowId};
use crate::order::select_next;
use crate::traits::{check_command_shortcuts, Browser};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Possible errors from the arranger.
#[derive(Debug, thiserror::Error)]
pub enum ArrangerError {
    /// The browser returned an error.
    #[error("browser error: {0}")]
    Browser(String),

    /// A window snapshot could not be used for directional selection.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

fn browser_error(e: impl std::fmt::Display) -> ArrangerError {
    ArrangerError::Browser(e.to_string())
}

/// Focus behavior after tabs have been moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangerConfig {
    /// Focus the window created by a detach.
    pub focus_new_window: bool,
    /// Focus the window the tabs were attached to.
    pub focus_target_window: bool,
}

impl Default for ArrangerConfig {
    fn default() -> Self {
        Self {
            focus_new_window: true,
            focus_target_window: true,
        }
    }
}

/// Executes detach/attach commands against a [`Browser`].
///
/// # Typical usage
///
/// ```ignore
/// let mut arranger = TabArranger::new(browser);
/// arranger.handle(Command::Attach(Direction::Right))?;
/// ```
pub struct TabArranger<B: Browser> {
    browser: B,
    config: ArrangerConfig,
}

impl<B: Browser> TabArranger<B> {
    /// Create a new arranger with the default configuration.
    pub fn new(browser: B) -> Self {
        Self {
            browser,
            config: ArrangerConfig::default(),
        }
    }

    /// Replace the focus configuration.
    pub fn set_config(&mut self, config: ArrangerConfig) {
        self.config = config;
    }

    /// Return a shared reference to the underlying browser.
    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Process a single [`Command`].
    pub fn handle(&mut self, cmd: Command) -> Result<(), ArrangerError> {
        match cmd {
            Command::Detach => {
                info!("detach");
                self.detach()
            }
            Command::Attach(dir) => {
                info!("attach {}", dir);
                self.attach(dir)
            }
        }
    }

    /// Report registered commands whose shortcut could not be bound.
    ///
    /// Logs a warning listing them and returns their names.
    pub fn check_shortcuts(&self) -> Result<Vec<String>, ArrangerError> {
        let commands = self.browser.commands().map_err(browser_error)?;
        let missing = check_command_shortcuts(&commands);
        if missing.is_empty() {
            debug!("all {} shortcuts registered", commands.len());
        } else {
            warn!("not all shortcuts were registered: {:?}", missing);
        }
        Ok(missing)
    }

    /// Move the highlighted tabs of the focused window into a new window,
    /// keeping them all highlighted.
    fn detach(&self) -> Result<(), ArrangerError> {
        let focused = self
            .browser
            .last_focused_window()
            .map_err(browser_error)?;
        let window = focused.id.ok_or(GeometryError::InvalidInput {
            field: "id",
            window: None,
        })?;

        let mut tabs = self.highlighted_tabs(window)?.into_iter();
        let Some(first) = tabs.next() else {
            debug!("no highlighted tabs in window {}", window);
            return Ok(());
        };
        let rest: Vec<TabId> = tabs.collect();

        let new_window = self
            .browser
            .create_window(first, self.config.focus_new_window)
            .map_err(browser_error)?;
        info!("  → tab {} detached into window {}", first, new_window);
        self.browser
            .update_tab(
                first,
                TabUpdate {
                    highlighted: Some(true),
                    active: Some(true),
                },
            )
            .map_err(browser_error)?;

        if rest.is_empty() {
            return Ok(());
        }
        self.browser
            .move_tabs(&rest, new_window)
            .map_err(browser_error)?;
        for &tab in &rest {
            self.browser
                .update_tab(
                    tab,
                    TabUpdate {
                        highlighted: Some(true),
                        active: None,
                    },
                )
                .map_err(browser_error)?;
        }
        Ok(())
    }

    /// Move the highlighted tabs of the focused window into the nearest
    /// window in `dir`.
    fn attach(&self, dir: Direction) -> Result<(), ArrangerError> {
        let focused = self
            .browser
            .last_focused_window()
            .map_err(browser_error)?;
        let windows = self.browser.windows().map_err(browser_error)?;

        let target = select_next(&focused, &windows, dir)?;
        // `select_next` has validated the focused window, so its id is set.
        let source = focused.id.unwrap_or(target);
        if target == source {
            info!("no windows found {} of window {}", dir, source);
            return Ok(());
        }

        let tabs = self.highlighted_tabs(source)?;
        if tabs.is_empty() {
            debug!("no highlighted tabs in window {}", source);
            return Ok(());
        }

        info!("  → moving {} tab(s) to window {}", tabs.len(), target);
        self.browser
            .move_tabs(&tabs, target)
            .map_err(browser_error)?;

        // Activating a tab resets the selection, so only the first one is
        // made active.
        for (i, &tab) in tabs.iter().enumerate() {
            self.browser
                .update_tab(
                    tab,
                    TabUpdate {
                        highlighted: Some(true),
                        active: Some(i == 0),
                    },
                )
                .map_err(browser_error)?;
        }

        if self.config.focus_target_window {
            self.browser.focus_window(target).map_err(browser_error)?;
        }
        Ok(())
    }

    /// Ids of the highlighted tabs of `window`, in tab-strip order.
    fn highlighted_tabs(&self, window: WindowId) -> Result<Vec<TabId>, ArrangerError> {
        let tabs = self.browser.tabs(window).map_err(browser_error)?;
        Ok(tabs
            .into_iter()
            .filter(|t| t.highlighted)
            .filter_map(|t| t.id)
            .collect())
    }
}
