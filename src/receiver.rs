//! Background receive task for the duplex session.
//!
//! One task owns the read half of the connection: raw reads are fed through
//! a [`FrameBuffer`] and each decoded frame is printed as a line. The task
//! shares nothing with the send path but the socket itself; its failures
//! terminate this path only.
//!
//! # Architecture
//!
//! ```text
//! Socket read half ─► FrameBuffer ─► Frame::text ─► output line
//! ```

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::protocol::FrameBuffer;
use crate::session::with_timeout;

/// Handle to the spawned receive task.
///
/// The duplex session never joins this task; the handle exists so callers
/// that want determinism (tests, embedders) can await the receive path's
/// termination. Dropping it detaches the task.
pub type ReceiverHandle = JoinHandle<Result<()>>;

/// Scratch read buffer size.
const READ_BUF_SIZE: usize = 4 * 1024;

/// Spawn the receive task over the read half of the connection.
///
/// The task runs [`receive_loop`] and logs its terminating error, if any.
pub fn spawn_receiver_task<R, W>(
    reader: R,
    output: W,
    read_timeout: Option<Duration>,
) -> ReceiverHandle
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let result = receive_loop(reader, output, read_timeout).await;
        if let Err(e) = &result {
            tracing::error!("receive path terminated: {e}");
        }
        result
    })
}

/// Read loop: assemble frames and write one line per frame to `output`.
///
/// Partial reads are normal and absorbed by the frame buffer. Returns
/// `Ok(())` on orderly close (a read of 0 bytes). A read error, an elapsed
/// `read_timeout`, or a malformed declared length ends the loop with an
/// error; the partner send path is unaffected either way.
pub async fn receive_loop<R, W>(
    mut reader: R,
    mut output: W,
    read_timeout: Option<Duration>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut frames = FrameBuffer::new();
    let mut buf = vec![0u8; READ_BUF_SIZE];

    loop {
        let n = with_timeout(read_timeout, reader.read(&mut buf)).await?;
        if n == 0 {
            tracing::debug!("connection closed by peer");
            return Ok(());
        }

        for frame in frames.push(&buf[..n])? {
            tracing::trace!("received {} byte frame", frame.declared_len());
            output.write_all(frame.text().as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
    }
}
