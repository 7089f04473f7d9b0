//! Wire format encoding.
//!
//! Every frame starts with a 2-byte length field:
//! ```text
//! ┌────────────┬──────────────────┐
//! │ Length     │ Content          │
//! │ 2 bytes    │ length - 2 bytes │
//! │ uint16 BE  │                  │
//! └────────────┴──────────────────┘
//! ```
//!
//! The declared length counts itself: a frame carrying `n` content bytes
//! declares `n + 2` and occupies exactly `n + 2` bytes on the wire. The
//! receive side consumes the declared total and drops the first 2 bytes, so
//! content is always `length - 2` bytes. Deployed peers depend on this
//! accounting; do not change it.

use bytes::{BufMut, Bytes, BytesMut};

/// Size of the length field in bytes.
pub const LENGTH_FIELD_SIZE: usize = 2;

/// Bytes of lookahead required before a frame boundary can be trusted.
///
/// The reference peer peeks 3 bytes before committing to a frame; fewer
/// buffered bytes at stream end never form a frame.
pub const HEADER_PEEK_SIZE: usize = 3;

/// Maximum command length in bytes. Longer commands are truncated.
///
/// Derived from the peer's 256-byte staging buffer: 2 length bytes plus up
/// to 254 content bytes.
pub const MAX_COMMAND_LEN: usize = 254;

/// Maximum total frame size on the wire (the length field is a u16).
pub const MAX_FRAME_LEN: usize = u16::MAX as usize;

/// Minimum valid declared length (empty content, the field counts itself).
pub const MIN_FRAME_LEN: usize = LENGTH_FIELD_SIZE;

/// Encode a command into a length-prefixed frame.
///
/// Commands longer than [`MAX_COMMAND_LEN`] are silently truncated to 254
/// bytes. Truncation is byte-level, not character-level; control commands
/// are ASCII in practice.
///
/// # Example
///
/// ```
/// use sndcmd::protocol::encode_command;
///
/// let frame = encode_command("ping");
/// assert_eq!(&frame[..], &[0x00, 0x06, b'p', b'i', b'n', b'g']);
/// ```
pub fn encode_command(command: &str) -> Bytes {
    let content = &command.as_bytes()[..command.len().min(MAX_COMMAND_LEN)];
    let wire_len = (content.len() + LENGTH_FIELD_SIZE) as u16;

    let mut buf = BytesMut::with_capacity(wire_len as usize);
    buf.put_u16(wire_len);
    buf.put_slice(content);
    buf.freeze()
}

/// Read the declared frame length from the start of `buf`.
///
/// Returns `None` while fewer than [`HEADER_PEEK_SIZE`] bytes are available.
pub fn read_length(buf: &[u8]) -> Option<u16> {
    if buf.len() < HEADER_PEEK_SIZE {
        return None;
    }
    Some(u16::from_be_bytes([buf[0], buf[1]]))
}
