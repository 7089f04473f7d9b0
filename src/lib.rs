//! # sndcmd
//!
//! Control-channel client for a proxy's command port.
//!
//! Connects over TCP, sends textual commands framed with a 2-byte
//! big-endian length prefix, and prints framed responses received
//! asynchronously. Single connection, single logical session; no request
//! correlation, no multiplexing, no authentication.
//!
//! ## Architecture
//!
//! - **Framer** ([`protocol`]): encodes a command into a length-prefixed
//!   frame and turns the incoming byte stream into discrete frames,
//!   absorbing partial reads.
//! - **Duplex session** ([`session`]): owns the connection. One-shot mode
//!   sends a single command and closes; interactive mode relays input
//!   lines while a background task ([`receiver`]) prints received frames.
//!
//! ## Example
//!
//! ```ignore
//! use sndcmd::session::{Session, SessionConfig, DEFAULT_CONTROL_PORT};
//!
//! #[tokio::main]
//! async fn main() -> sndcmd::Result<()> {
//!     let session =
//!         Session::connect("localhost", DEFAULT_CONTROL_PORT, SessionConfig::default()).await?;
//!     session.send_command("status").await
//! }
//! ```

pub mod error;
pub mod protocol;
pub mod receiver;
pub mod session;

pub use error::{Result, SndcmdError};
pub use session::{Session, SessionConfig, DEFAULT_CONTROL_PORT};
