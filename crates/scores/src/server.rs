//! TCP server for the high score service.
//!
//! One task per connection; requests and responses are single JSON lines.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, RwLock};

use crate::protocol::{encode_response, parse_request, Request, Response};
use crate::store::ScoreStore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:7878".to_string(),
        }
    }
}

impl ServerConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let addr = std::env::var("BLOCKFALL_SCORES_ADDR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "127.0.0.1:7878".to_string());
        Self { addr }
    }
}

/// Run the service until the process exits.
///
/// `ready_tx`, when present, receives the bound address once the listener is
/// up. Binding to port 0 plus `ready_tx` gives tests a free port.
pub async fn run_server(
    config: ServerConfig,
    store: Arc<RwLock<ScoreStore>>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> Result<()> {
    let listener = TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    let local = listener.local_addr().context("listener has no local addr")?;
    eprintln!("[scores] listening on {}", local);

    if let Some(tx) = ready_tx {
        let _ = tx.send(local);
    }

    loop {
        let (stream, peer) = listener.accept().await.context("accept failed")?;
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, store).await {
                eprintln!("[scores] connection {} closed: {:#}", peer, e);
            }
        });
    }
}

async fn handle_connection(stream: TcpStream, store: Arc<RwLock<ScoreStore>>) -> Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match parse_request(&line) {
            Ok(Request::AddHighScore { name, score }) => {
                store.write().await.add(name, score);
                Response::Ack
            }
            Ok(Request::GetHighScores) => Response::HighScores {
                entries: store.read().await.entries().to_vec(),
            },
            Err(e) => Response::Error {
                message: format!("bad request: {}", e),
            },
        };

        let mut out = encode_response(&response)?;
        out.push('\n');
        write_half.write_all(out.as_bytes()).await?;
    }

    Ok(())
}
