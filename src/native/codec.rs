//! Native messaging framing.
//!
//! # Wire format
//!
//! Each message is UTF-8 JSON preceded by its length in bytes as a 32-bit
//! unsigned integer in native byte order:
//!
//! ```text
//! [len: u32 (native endian)][len bytes of JSON]
//! ```
//!
//! Browsers refuse messages from a host larger than 1 MiB.

use log::trace;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{self, Read, Write};

/// Largest message the browser accepts from a host.
pub const MAX_OUTGOING: usize = 1024 * 1024;

/// Largest message accepted from the browser.
pub const MAX_INCOMING: usize = 64 * 1024 * 1024;

/// Errors produced while reading or writing frames.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("message of {0} bytes exceeds the {1} byte limit")]
    TooLarge(usize, usize),
    #[error("stream ended inside a frame")]
    Truncated,
}

/// Read one message.
///
/// Returns `Ok(None)` when the stream ends cleanly between frames, which is
/// how the browser signals that the extension disconnected.
pub fn read_message<R: Read, T: DeserializeOwned>(reader: &mut R) -> Result<Option<T>, CodecError> {
    let mut header = [0u8; 4];
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(CodecError::Truncated),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let len = u32::from_ne_bytes(header) as usize;
    if len > MAX_INCOMING {
        return Err(CodecError::TooLarge(len, MAX_INCOMING));
    }
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => CodecError::Truncated,
        _ => CodecError::Io(e),
    })?;
    trace!("<- {}", String::from_utf8_lossy(&body));
    Ok(Some(serde_json::from_slice(&body)?))
}

/// Write one message and flush it.
pub fn write_message<W: Write, T: Serialize>(writer: &mut W, message: &T) -> Result<(), CodecError> {
    let body = serde_json::to_vec(message)?;
    if body.len() > MAX_OUTGOING {
        return Err(CodecError::TooLarge(body.len(), MAX_OUTGOING));
    }
    trace!("-> {}", String::from_utf8_lossy(&body));
    writer.write_all(&(body.len() as u32).to_ne_bytes())?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}
