//! Frame struct with content accessors.
//!
//! Represents one decoded protocol message. Uses `bytes::Bytes` for
//! zero-copy content sharing.

use bytes::Bytes;

use super::wire_format::LENGTH_FIELD_SIZE;

/// A complete decoded frame.
///
/// Holds the content bytes that follow the dropped 2-byte header. Content
/// may carry interior NUL bytes; [`Frame::text`] stops at the first one,
/// which is how a null-terminated peer prints it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Content bytes (zero-copy via `bytes::Bytes`).
    pub content: Bytes,
}

impl Frame {
    /// Create a frame from decoded content bytes.
    pub fn new(content: Bytes) -> Self {
        Self { content }
    }

    /// Get a reference to the content bytes.
    #[inline]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Get the content length in bytes.
    #[inline]
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Declared wire length for this frame: content plus the length field
    /// that counts itself.
    #[inline]
    pub fn declared_len(&self) -> u16 {
        (self.content.len() + LENGTH_FIELD_SIZE) as u16
    }

    /// Printable text for this frame.
    ///
    /// Lossy UTF-8, truncated at the first interior NUL byte.
    pub fn text(&self) -> String {
        let end = self
            .content
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.content.len());
        String::from_utf8_lossy(&self.content[..end]).into_owned()
    }
}
