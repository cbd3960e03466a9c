//! Native messaging bridge to the browser extension.
//!
//! The browser starts tabshift as a *native messaging host* and talks to it
//! over stdin/stdout.  [`codec`] implements the framing and [`browser`]
//! implements the [`Browser`](crate::traits::Browser) trait on top of it.
//!
//! Nothing outside this module should know about the wire protocol.

pub mod browser;
pub mod codec;
