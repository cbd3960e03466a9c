//! [`Browser`] implementation backed by the native messaging channel.
//!
//! The extension forwards keyboard shortcuts and answers API requests on
//! the same stream, so inbound messages are one of two kinds:
//!
//! ```json
//! {"type":"command","name":"attach-left"}
//! {"type":"response","id":3,"result":[{"id":1,"top":0,"left":0,"width":800,"height":600}]}
//! {"type":"response","id":4,"error":"No tab with id: 17."}
//! ```
//!
//! Outbound messages are requests naming the extension API to call:
//!
//! ```json
//! {"type":"request","id":3,"method":"windows.getAll","params":{}}
//! ```
//!
//! Commands that arrive while a response is awaited are queued and handed
//! out by [`NativeBrowser::next_command`] in arrival order.

use crate::command::{ShortcutInfo, TabInfo, TabUpdate, WindowInfo};
use crate::geometry::{TabId, WindowId};
use crate::native::codec::{read_message, write_message, CodecError};
use crate::traits::Browser;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Read, Write};

/// Errors that can occur when talking to the extension.
#[derive(Debug, thiserror::Error)]
pub enum NativeError {
    #[error("transport error: {0}")]
    Codec(#[from] CodecError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{method} failed: {message}")]
    Remote { method: String, message: String },
    #[error("{method} returned no `{field}`")]
    Malformed { method: String, field: &'static str },
    #[error("extension disconnected")]
    Disconnected,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Outbound<'a> {
    Request {
        id: u64,
        method: &'a str,
        params: Value,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Inbound {
    Response {
        id: u64,
        #[serde(default)]
        result: Value,
        #[serde(default)]
        error: Option<String>,
    },
    Command {
        name: String,
    },
}

struct Channel<R, W> {
    reader: R,
    writer: W,
    next_id: u64,
    pending: VecDeque<String>,
}

/// Extension-backed browser.
///
/// Every [`Browser`] call is one request/response round trip.  The channel
/// is strictly sequential: the host never has more than one request in
/// flight.
pub struct NativeBrowser<R: Read, W: Write> {
    channel: RefCell<Channel<R, W>>,
}

impl<R: Read, W: Write> NativeBrowser<R, W> {
    /// Wrap the streams the browser connected to the host (normally stdin
    /// and stdout).
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            channel: RefCell::new(Channel {
                reader,
                writer,
                next_id: 1,
                pending: VecDeque::new(),
            }),
        }
    }

    /// Take back the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        let channel = self.channel.into_inner();
        (channel.reader, channel.writer)
    }

    /// Block until the extension reports the next shortcut, returning its
    /// command name.
    ///
    /// Returns `Ok(None)` once the extension disconnects.
    pub fn next_command(&self) -> Result<Option<String>, NativeError> {
        let mut channel = self.channel.borrow_mut();
        if let Some(name) = channel.pending.pop_front() {
            return Ok(Some(name));
        }
        loop {
            match read_message::<_, Inbound>(&mut channel.reader)? {
                None => return Ok(None),
                Some(Inbound::Command { name }) => return Ok(Some(name)),
                Some(Inbound::Response { id, .. }) => {
                    warn!("dropping response {} with no request in flight", id);
                }
            }
        }
    }

    /// Call `method` in the extension and decode its result.
    fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, NativeError> {
        let mut channel = self.channel.borrow_mut();
        let id = channel.next_id;
        channel.next_id += 1;

        debug!("request {} {}", id, method);
        write_message(
            &mut channel.writer,
            &Outbound::Request { id, method, params },
        )?;

        loop {
            match read_message::<_, Inbound>(&mut channel.reader)? {
                None => return Err(NativeError::Disconnected),
                Some(Inbound::Command { name }) => {
                    debug!("queueing command {} while awaiting {}", name, method);
                    channel.pending.push_back(name);
                }
                Some(Inbound::Response { id: got, .. }) if got != id => {
                    warn!("dropping response {} while awaiting {}", got, id);
                }
                Some(Inbound::Response {
                    error: Some(message),
                    ..
                }) => {
                    return Err(NativeError::Remote {
                        method: method.to_string(),
                        message,
                    });
                }
                Some(Inbound::Response { result, .. }) => {
                    return Ok(serde_json::from_value(result)?);
                }
            }
        }
    }
}

//  Browser implementation

impl<R: Read, W: Write> Browser for NativeBrowser<R, W> {
    type Error = NativeError;

    fn last_focused_window(&self) -> Result<WindowInfo, Self::Error> {
        self.request("windows.getLastFocused", json!({}))
    }

    fn windows(&self) -> Result<Vec<WindowInfo>, Self::Error> {
        self.request("windows.getAll", json!({}))
    }

    fn tabs(&self, window: WindowId) -> Result<Vec<TabInfo>, Self::Error> {
        self.request("tabs.query", json!({ "windowId": window }))
    }

    fn move_tabs(&self, tabs: &[TabId], window: WindowId) -> Result<(), Self::Error> {
        self.request::<Value>(
            "tabs.move",
            json!({ "tabIds": tabs, "windowId": window, "index": -1 }),
        )?;
        Ok(())
    }

    fn create_window(&self, tab: TabId, focused: bool) -> Result<WindowId, Self::Error> {
        let method = "windows.create";
        let window: WindowInfo = self.request(method, json!({ "tabId": tab, "focused": focused }))?;
        window.id.ok_or(NativeError::Malformed {
            method: method.to_string(),
            field: "id",
        })
    }

    fn update_tab(&self, tab: TabId, update: TabUpdate) -> Result<(), Self::Error> {
        let mut params = serde_json::to_value(update)?;
        params["tabId"] = json!(tab);
        self.request::<Value>("tabs.update", params)?;
        Ok(())
    }

    fn focus_window(&self, window: WindowId) -> Result<(), Self::Error> {
        self.request::<Value>(
            "windows.update",
            json!({ "windowId": window, "focused": true }),
        )?;
        Ok(())
    }

    fn commands(&self) -> Result<Vec<ShortcutInfo>, Self::Error> {
        self.request("commands.getAll", json!({}))
    }
}
