//! Control server stub - a frame-echoing peer for manual testing.
//!
//! Listens on the default control port, decodes incoming command frames,
//! and answers each with an acknowledgment frame.
//!
//! # Running against sndcmd
//!
//! ```sh
//! cargo run --example control_server
//! # in another terminal:
//! cargo run -- localhost status    # one-shot
//! cargo run -- localhost           # interactive, type commands
//! ```

use sndcmd::protocol::{encode_command, FrameBuffer};
use sndcmd::DEFAULT_CONTROL_PORT;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(("127.0.0.1", DEFAULT_CONTROL_PORT)).await?;
    println!("control server listening on {}", listener.local_addr()?);

    loop {
        let (mut stream, peer) = listener.accept().await?;
        println!("connection from {peer}");

        tokio::spawn(async move {
            let mut frames = FrameBuffer::new();
            let mut buf = [0u8; 1024];

            'conn: loop {
                let n = match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };

                let decoded = match frames.push(&buf[..n]) {
                    Ok(decoded) => decoded,
                    Err(e) => {
                        eprintln!("bad frame from {peer}: {e}");
                        break;
                    }
                };

                for frame in decoded {
                    let command = frame.text();
                    println!("[{peer}] {command}");

                    let reply = encode_command(&format!("ok: {command}"));
                    if stream.write_all(&reply).await.is_err() {
                        break 'conn;
                    }
                }
            }

            println!("connection from {peer} closed");
        });
    }
}
