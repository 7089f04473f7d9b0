//! Protocol module - wire format, framing, and the frame type.
//!
//! This module implements the control-channel framing:
//! - 2-byte big-endian length field that counts itself
//! - Command encoding with staging-buffer truncation
//! - Frame buffer for accumulating partial reads

mod frame;
mod frame_buffer;
mod wire_format;

pub use frame::Frame;
pub use frame_buffer::FrameBuffer;
pub use wire_format::{
    encode_command, read_length, HEADER_PEEK_SIZE, LENGTH_FIELD_SIZE, MAX_COMMAND_LEN,
    MAX_FRAME_LEN, MIN_FRAME_LEN,
};
