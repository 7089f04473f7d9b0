//! Duplex session over the proxy control connection.
//!
//! A [`Session`] owns one TCP connection for its whole lifetime:
//! 1. Resolve the host and connect (single attempt, no retry)
//! 2. Enter exactly one of two sending modes:
//!    - **one-shot**: encode and send a single command, no receive path
//!    - **interactive**: split the stream; a background task prints
//!      received frames while the foreground loop relays input lines
//! 3. Close the connection exactly once
//!
//! The two interactive paths share nothing but the socket — concurrent read
//! and write on a connected stream are independent directions and need no
//! lock. There is no cancellation protocol between them: the receive task
//! winds down on its own once the connection closes, and the process may
//! exit while it is mid-teardown. That limitation is inherited from the
//! protocol's peers and kept.
//!
//! # Example
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

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{lookup_host, TcpStream};

use crate::error::{Result, SndcmdError};
use crate::protocol::encode_command;
use crate::receiver::{spawn_receiver_task, ReceiverHandle};

/// Default proxy control port.
pub const DEFAULT_CONTROL_PORT: u16 = 3333;

/// Session configuration.
///
/// Every timeout defaults to `None`: connect, reads, and writes block
/// without bound, matching the peers this client talks to. A hung peer
/// stalls the corresponding path indefinitely unless a bound is set here
/// (tests set small ones to exercise the timeout paths deterministically).
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Bound on the connect attempt.
    pub connect_timeout: Option<Duration>,
    /// Bound on each read on the receive path.
    pub read_timeout: Option<Duration>,
    /// Bound on each frame write.
    pub write_timeout: Option<Duration>,
}

/// A connected control-channel session.
pub struct Session {
    stream: TcpStream,
    config: SessionConfig,
}

impl Session {
    /// Resolve `host` and connect to its control port.
    ///
    /// Resolution and connect are single attempts; any failure here is
    /// fatal to the whole session. IPv4 addresses are preferred when the
    /// name resolves to several.
    pub async fn connect(host: &str, port: u16, config: SessionConfig) -> Result<Self> {
        let addr = resolve(host, port).await?;
        tracing::debug!("connecting to {addr}");

        let stream = with_timeout(config.connect_timeout, TcpStream::connect(addr)).await?;

        Ok(Self { stream, config })
    }

    /// One-shot mode: send a single command and close the connection.
    ///
    /// No receive path is started. The frame goes out as one logical write
    /// (`write_all` loops over partial writes internally). Consumes the
    /// session; the connection is closed on return.
    pub async fn send_command(mut self, command: &str) -> Result<()> {
        let frame = encode_command(command);

        with_timeout(self.config.write_timeout, self.stream.write_all(&frame)).await?;
        self.stream.flush().await?;
        self.stream.shutdown().await?;

        Ok(())
    }

    /// Interactive mode: relay `input` lines as command frames while a
    /// background task prints frames received on the same connection to
    /// `output`, one line each.
    ///
    /// The foreground loop runs until `input` ends or a write fails; write
    /// and input failures terminate the loop and are logged, not surfaced.
    /// The write direction is then shut down so the peer sees EOF.
    ///
    /// The receive task is NOT joined. The returned handle lets callers
    /// await its termination; dropping it (as the CLI does) leaves the task
    /// to wind down on its own when the connection closes.
    pub async fn run_interactive<I, O>(self, input: I, output: O) -> ReceiverHandle
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin + Send + 'static,
    {
        let (read_half, mut write_half) = self.stream.into_split();
        let receiver = spawn_receiver_task(read_half, output, self.config.read_timeout);

        let mut lines = input.lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("reading command input failed: {e}");
                    break;
                }
            };

            let frame = encode_command(&line);
            let written = with_timeout(self.config.write_timeout, async {
                write_half.write_all(&frame).await?;
                write_half.flush().await
            })
            .await;

            if let Err(e) = written {
                tracing::error!("sending command failed: {e}");
                break;
            }
        }

        // Half-close our direction; the receive task keeps draining until
        // the peer closes its side.
        if let Err(e) = write_half.shutdown().await {
            tracing::debug!("shutdown after send loop: {e}");
        }

        receiver
    }
}

/// Single-attempt host resolution, preferring IPv4.
async fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    let addrs: Vec<SocketAddr> = lookup_host((host, port))
        .await
        .map_err(|e| SndcmdError::Resolve(format!("{host}: {e}")))?
        .collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| SndcmdError::Resolve(format!("{host}: no addresses found")))
}

/// Await `fut`, bounding it by `limit` when one is set.
pub(crate) async fn with_timeout<T, F>(limit: Option<Duration>, fut: F) -> Result<T>
where
    F: Future<Output = std::io::Result<T>>,
{
    match limit {
        Some(duration) => match tokio::time::timeout(duration, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(SndcmdError::Timeout(duration)),
        },
        None => Ok(fut.await?),
    }
}
