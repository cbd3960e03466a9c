//! **tabshift** — move browser tabs between windows by direction.
//!
//! The user selects tabs and either *detaches* them into a new window or
//! *attaches* them to the neighboring window to the left, right, above or
//! below.  Picking that neighbor is the only interesting part: see
//! [`order::select_next`] and [`geometry::Rect::comes_before`].
//!
//! # Architecture
//!
//! * [`order`] and [`geometry`] — pure, synchronous window selection.
//! * [`traits::Browser`] — abstracts window/tab queries and tab movement so
//!   the arranger is not coupled to any specific transport.
//! * [`arranger::TabArranger`] — turns a [`command::Command`] into browser
//!   calls, deciding everything before the first mutating call.
//!
//! The concrete backend lives in [`native`] (the browser's native messaging
//! protocol over stdin/stdout).

pub mod arranger;
pub mod command;
pub mod config;
pub mod geometry;
pub mod native;
pub mod order;
pub mod traits;
