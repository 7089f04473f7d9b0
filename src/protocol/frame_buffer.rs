//! Frame buffer for accumulating partial reads.
//!
//! Uses `bytes::BytesMut` for zero-copy buffer management. Implements a
//! state machine for handling fragmented frames:
//! - `WaitingForHeader`: need at least 3 bytes to trust a frame boundary
//! - `WaitingForBody`: length known, need the declared total
//!
//! A `recv` returning fewer bytes than a frame is normal; callers just keep
//! pushing whatever the socket yields.
//!
//! # Example
//!
//! ```
//! use sndcmd::protocol::FrameBuffer;
//!
//! let mut buffer = FrameBuffer::new();
//!
//! // Data arrives in arbitrary chunks from the socket.
//! let frames = buffer.push(&[0x00, 0x06, b'p', b'i', b'n', b'g']).unwrap();
//! assert_eq!(frames[0].text(), "ping");
//! ```

use bytes::BytesMut;

use super::wire_format::{read_length, LENGTH_FIELD_SIZE, MIN_FRAME_LEN};
use super::Frame;
use crate::error::{Result, SndcmdError};

/// State machine for frame parsing.
#[derive(Debug, Clone, Copy)]
enum State {
    /// Waiting for enough bytes to read the length field (need 3 bytes).
    WaitingForHeader,
    /// Length known, waiting for the declared total to arrive.
    ///
    /// `frame_len` is the declared length: it includes the 2 length bytes.
    WaitingForBody { frame_len: usize },
}

/// Buffer for accumulating incoming bytes and extracting complete frames.
///
/// All data is stored in a single `BytesMut` buffer; frame content is split
/// off without copying.
pub struct FrameBuffer {
    /// Accumulated bytes from socket reads.
    buffer: BytesMut,
    /// Current parsing state.
    state: State,
}

impl FrameBuffer {
    /// Create a new frame buffer.
    ///
    /// Initial capacity covers the largest command frame; the buffer grows
    /// if a peer declares more.
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(4 * 1024),
            state: State::WaitingForHeader,
        }
    }

    /// Push data into the buffer and extract all complete frames.
    ///
    /// This is the main API for processing incoming data from the socket.
    /// Returns every frame completed by `data`; fragmented remainders are
    /// buffered for the next push.
    ///
    /// # Errors
    ///
    /// Returns [`SndcmdError::Protocol`] if a declared length is below the
    /// 2-byte minimum. The buffer is unusable afterwards; the receive path
    /// is expected to stop.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<Frame>> {
        self.buffer.extend_from_slice(data);

        let mut frames = Vec::new();
        while let Some(frame) = self.try_extract_one()? {
            frames.push(frame);
        }

        Ok(frames)
    }

    /// Try to extract a single frame from the buffer.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` if a complete frame was extracted
    /// - `Ok(None)` if more data is needed
    /// - `Err(...)` on a malformed declared length
    fn try_extract_one(&mut self) -> Result<Option<Frame>> {
        match self.state {
            State::WaitingForHeader => {
                let declared = match read_length(&self.buffer) {
                    Some(declared) => declared as usize,
                    None => return Ok(None),
                };

                // The declared length counts its own 2 bytes; anything
                // smaller cannot be consumed without underflow.
                if declared < MIN_FRAME_LEN {
                    return Err(SndcmdError::Protocol(format!(
                        "declared frame length {declared} is below the {MIN_FRAME_LEN}-byte minimum"
                    )));
                }

                self.state = State::WaitingForBody {
                    frame_len: declared,
                };

                // Try to complete the frame immediately.
                self.try_extract_one()
            }

            State::WaitingForBody { frame_len } => {
                if self.buffer.len() < frame_len {
                    return Ok(None);
                }

                // Consume the declared total, then drop the 2 header bytes;
                // the remaining frame_len - 2 bytes are the content.
                let mut raw = self.buffer.split_to(frame_len);
                let _ = raw.split_to(LENGTH_FIELD_SIZE);

                self.state = State::WaitingForHeader;

                Ok(Some(Frame::new(raw.freeze())))
            }
        }
    }

    /// Get the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the buffer and reset state.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = State::WaitingForHeader;
    }

    /// Get the current state for debugging.
    #[cfg(test)]
    fn state_name(&self) -> &'static str {
        match &self.state {
            State::WaitingForHeader => "WaitingForHeader",
            State::WaitingForBody { .. } => "WaitingForBody",
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
