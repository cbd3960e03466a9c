//! Commands and types used throughout tabshift.
//!
//! This module defines the vocabulary that all components share:
//! [`Command`] describes every action the arranger can perform,
//! and [`Direction`] / [`WindowInfo`] / [`TabInfo`] provide the supporting
//! data types exchanged with the browser.
//!
//! The browser reports keyboard shortcuts by command *name*
//! (`"detach-tab"`, `"attach-left"`, …).  Names are mapped onto the closed
//! [`Command`] set; anything else is rejected with [`UnknownCommand`].

use crate::geometry::{GeometryError, Rect, TabId, WindowId};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Cardinal direction used both for geometric comparison and for naming
/// attach commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way on the same axis.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `true` for directions in which coordinates grow (right, down).
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Parse a direction string (case-insensitive, surrounding whitespace ignored).
fn parse_direction(s: &str) -> Option<Direction> {
    match s.trim().to_lowercase().as_str() {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_direction(&s).ok_or_else(|| DeError::custom(format!("invalid direction: {:?}", s)))
    }
}

/// Every action the arranger can perform.
///
/// Commands originate from browser keyboard shortcuts and are consumed by
/// the [`TabArranger`](crate::arranger::TabArranger).  On the wire a command
/// is its shortcut name, e.g. `"attach-left"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the highlighted tabs of the focused window into a new window.
    Detach,

    /// Move the highlighted tabs of the focused window into the nearest
    /// window in the given direction and focus that window.
    ///
    /// If no window lies in that direction, the command is a no-op.
    Attach(Direction),
}

impl Command {
    /// Every command, in the order the extension registers them.
    pub const ALL: [Command; 5] = [
        Command::Detach,
        Command::Attach(Direction::Left),
        Command::Attach(Direction::Right),
        Command::Attach(Direction::Up),
        Command::Attach(Direction::Down),
    ];
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Detach => write!(f, "detach-tab"),
            Command::Attach(dir) => write!(f, "attach-{}", dir),
        }
    }
}

/// A shortcut name that does not map to any [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported command: {0:?}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name == "detach-tab" {
            return Ok(Command::Detach);
        }
        name.strip_prefix("attach-")
            .and_then(parse_direction)
            .map(Command::Attach)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

/// Snapshot of a browser window as reported by the browser.
///
/// Every geometry field is optional because the browser may omit them
/// (e.g. for minimized or devtools windows).  Use [`WindowInfo::rect`] to
/// obtain a validated [`Rect`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowInfo {
    pub id: Option<WindowId>,
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Whether the window currently has focus.
    pub focused: bool,
}

impl WindowInfo {
    /// Convenience constructor for a window with full geometry.
    pub fn new(id: WindowId, top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            id: Some(id),
            top: Some(top),
            left: Some(left),
            width: Some(width),
            height: Some(height),
            focused: false,
        }
    }

    /// Validate the snapshot into a [`Rect`].
    ///
    /// Fails with [`GeometryError::InvalidInput`] naming the first missing
    /// or unusable field.
    pub fn rect(&self) -> Result<Rect, GeometryError> {
        let id = self.id.ok_or(GeometryError::InvalidInput {
            field: "id",
            window: None,
        })?;
        let require = |value: Option<f64>, field: &'static str| {
            value.ok_or(GeometryError::InvalidInput {
                field,
                window: Some(id),
            })
        };
        Rect::new(
            id,
            require(self.top, "top")?,
            require(self.left, "left")?,
            require(self.width, "width")?,
            require(self.height, "height")?,
        )
    }
}

/// Minimal information about one tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabInfo {
    pub id: Option<TabId>,
    /// Part of the user's current tab selection.
    pub highlighted: bool,
    /// The visible tab of its window.
    pub active: bool,
}

/// Properties to change on a tab.  `None` leaves the property untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// A registered browser command together with its key binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutInfo {
    pub name: Option<String>,
    /// Key combination, or an empty string if the browser could not bind it.
    pub shortcut: Option<String>,
}
