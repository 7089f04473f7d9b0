//! Integration tests for sndcmd.
//!
//! End-to-end scenarios against a loopback TCP listener standing in for
//! the proxy's control port.

use std::time::Duration;

use sndcmd::protocol::{encode_command, FrameBuffer, MAX_COMMAND_LEN};
use sndcmd::{Session, SessionConfig, SndcmdError};
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

async fn listen() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// Read frames from a client connection until it closes.
async fn collect_frames(stream: &mut TcpStream) -> Vec<String> {
    let mut frames = FrameBuffer::new();
    let mut commands = Vec::new();
    let mut buf = [0u8; 1024];

    loop {
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        for frame in frames.push(&buf[..n]).unwrap() {
            commands.push(frame.text());
        }
    }

    commands
}

/// One-shot mode emits exactly one length-prefixed frame and closes.
#[tokio::test]
async fn test_one_shot_sends_single_frame() {
    let (listener, port) = listen().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        stream.read_to_end(&mut received).await.unwrap();
        received
    });

    let session = Session::connect("127.0.0.1", port, SessionConfig::default())
        .await
        .unwrap();
    session.send_command("status").await.unwrap();

    let received = server.await.unwrap();
    assert_eq!(received, [0x00, 0x08, b's', b't', b'a', b't', b'u', b's']);
}

/// The echo-stub fixture pins the header-byte-dropping behavior: the
/// 9-byte frame decodes to 7 content bytes and prints up to the NUL.
#[tokio::test]
async fn test_interactive_prints_header_stripped_frames() {
    let (listener, port) = listen().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        stream
            .write_all(&[0x00, 0x09, b'o', b'k', 0, b'd', b'o', b'n', b'e'])
            .await
            .unwrap();
        stream.write_all(&encode_command("ready")).await.unwrap();
        // Dropping the stream closes the connection; the client's receive
        // task should then terminate cleanly.
    });

    let session = Session::connect("127.0.0.1", port, SessionConfig::default())
        .await
        .unwrap();

    let (out_tx, mut out_rx) = duplex(1024);
    let input = BufReader::new(tokio::io::empty());
    let receiver = session.run_interactive(input, out_tx).await;

    receiver.await.unwrap().unwrap();
    server.await.unwrap();

    let mut printed = Vec::new();
    out_rx.read_to_end(&mut printed).await.unwrap();
    assert_eq!(printed, b"ok\nready\n");
}

/// Interactive mode relays each input line as its own frame.
#[tokio::test]
async fn test_interactive_relays_input_lines() {
    let (listener, port) = listen().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        collect_frames(&mut stream).await
    });

    let session = Session::connect("127.0.0.1", port, SessionConfig::default())
        .await
        .unwrap();

    let (out_tx, mut out_rx) = duplex(1024);
    let input = BufReader::new(&b"status\nreload\nshutdown\n"[..]);
    let receiver = session.run_interactive(input, out_tx).await;

    let commands = server.await.unwrap();
    assert_eq!(commands, ["status", "reload", "shutdown"]);

    receiver.await.unwrap().unwrap();
    let mut printed = Vec::new();
    out_rx.read_to_end(&mut printed).await.unwrap();
    assert!(printed.is_empty());
}

/// A command at the staging-buffer capacity survives; past it, the frame
/// carries the truncated 254 bytes.
#[tokio::test]
async fn test_command_truncation_boundary_on_the_wire() {
    for (len, expected_len) in [(MAX_COMMAND_LEN, MAX_COMMAND_LEN), (300, MAX_COMMAND_LEN)] {
        let (listener, port) = listen().await;

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            collect_frames(&mut stream).await
        });

        let command = "x".repeat(len);
        let session = Session::connect("127.0.0.1", port, SessionConfig::default())
            .await
            .unwrap();
        session.send_command(&command).await.unwrap();

        let commands = server.await.unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0], command[..expected_len]);
    }
}

/// A peer that closes after zero frames terminates the receive path
/// without an error for the partner path.
#[tokio::test]
async fn test_clean_close_terminates_receiver_without_error() {
    let (listener, port) = listen().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        drop(stream);
    });

    let session = Session::connect("127.0.0.1", port, SessionConfig::default())
        .await
        .unwrap();

    let (out_tx, mut out_rx) = duplex(256);
    let input = BufReader::new(tokio::io::empty());
    let receiver = session.run_interactive(input, out_tx).await;

    receiver.await.unwrap().unwrap();
    server.await.unwrap();

    let mut printed = Vec::new();
    out_rx.read_to_end(&mut printed).await.unwrap();
    assert!(printed.is_empty());
}

/// A silent peer trips the configured read timeout; only the receive path
/// reports it.
#[tokio::test]
async fn test_read_timeout_terminates_receive_path() {
    let (listener, port) = listen().await;

    let config = SessionConfig {
        read_timeout: Some(Duration::from_millis(50)),
        ..SessionConfig::default()
    };

    let (session, server) = tokio::join!(Session::connect("127.0.0.1", port, config), async {
        listener.accept().await.unwrap().0
    });
    let session = session.unwrap();

    let (out_tx, _out_rx) = duplex(256);
    let input = BufReader::new(tokio::io::empty());
    let receiver = session.run_interactive(input, out_tx).await;

    let result = receiver.await.unwrap();
    assert!(matches!(result, Err(SndcmdError::Timeout(_))));

    drop(server);
}

/// Connecting to a dead port fails the whole session up front.
#[tokio::test]
async fn test_connect_refused_is_session_fatal() {
    let (listener, port) = listen().await;
    drop(listener);

    let result = Session::connect("127.0.0.1", port, SessionConfig::default()).await;
    assert!(matches!(result, Err(SndcmdError::Io(_))));
}
