//! Command-line entry point.
//!
//! `sndcmd [-p PORT] [HOST] [CMD]` — with `CMD` present, sends one command
//! and exits; without it, relays stdin line-by-line while printing frames
//! received from the proxy. Frames go to stdout, logs to stderr.

use std::process;

use clap::Parser;
use tokio::io::BufReader;
use tracing::error;
use tracing_subscriber::{prelude::*, EnvFilter};

use sndcmd::session::{Session, SessionConfig, DEFAULT_CONTROL_PORT};

/// Send commands to a running proxy's control port.
#[derive(Parser, Debug)]
#[command(name = "sndcmd", version, about)]
struct Cli {
    /// Proxy control port
    #[arg(
        short = 'p',
        long = "port",
        default_value_t = DEFAULT_CONTROL_PORT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    port: u16,

    /// Proxy host
    #[arg(value_name = "HOST", default_value = "localhost")]
    host: String,

    /// Command to send in one-shot mode; commands are read from stdin when omitted
    #[arg(value_name = "CMD")]
    command: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let session = match Session::connect(&cli.host, cli.port, SessionConfig::default()).await {
        Ok(session) => session,
        Err(e) => {
            error!("connection failed: {e}");
            process::exit(-1);
        }
    };

    match cli.command {
        Some(command) => {
            // A send failure after a successful connect ends the session
            // without the connection-failure exit status.
            if let Err(e) = session.send_command(&command).await {
                error!("sending command failed: {e}");
            }
        }
        None => {
            let stdin = BufReader::new(tokio::io::stdin());
            // The receive task is not joined; process exit reclaims it.
            let _receiver = session.run_interactive(stdin, tokio::io::stdout()).await;
        }
    }
}
