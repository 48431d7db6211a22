//! Client side of the high score service.
//!
//! `submit_score` and `fetch_high_scores` are one-shot request/response
//! calls. `ScoreReporter` wraps them for the sync game loop: it owns a tokio
//! runtime and submits scores fire-and-forget, so a dead or slow backend
//! never stalls a frame.

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;

use crate::protocol::{Request, Response};
use crate::store::HighScore;

async fn round_trip(addr: &str, request: &Request) -> Result<Response> {
    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("failed to connect to {}", addr))?;
    let (read_half, mut write_half) = stream.into_split();

    let mut line = serde_json::to_string(request)?;
    line.push('\n');
    write_half.write_all(line.as_bytes()).await?;

    let mut lines = BufReader::new(read_half).lines();
    let reply = lines
        .next_line()
        .await?
        .context("connection closed before reply")?;
    Ok(serde_json::from_str(&reply)?)
}

/// Submit a score and wait for the ack.
pub async fn submit_score(addr: &str, name: &str, score: u32) -> Result<()> {
    let request = Request::AddHighScore {
        name: name.to_string(),
        score,
    };
    match round_trip(addr, &request).await? {
        Response::Ack => Ok(()),
        Response::Error { message } => bail!("score rejected: {}", message),
        other => bail!("unexpected reply: {:?}", other),
    }
}

/// Fetch the ordered table, best first.
pub async fn fetch_high_scores(addr: &str) -> Result<Vec<HighScore>> {
    match round_trip(addr, &Request::GetHighScores).await? {
        Response::HighScores { entries } => Ok(entries),
        Response::Error { message } => bail!("query rejected: {}", message),
        other => bail!("unexpected reply: {:?}", other),
    }
}

/// Fire-and-forget score submission for the sync game loop.
pub struct ScoreReporter {
    rt: Runtime,
    addr: String,
    player: String,
}

impl ScoreReporter {
    /// Build from environment variables.
    ///
    /// Returns None when `BLOCKFALL_SCORES_ADDR` is unset; the game then
    /// runs without persistence.
    pub fn start_from_env() -> Option<Self> {
        let addr = std::env::var("BLOCKFALL_SCORES_ADDR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())?;
        let player = std::env::var("BLOCKFALL_PLAYER")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "anonymous".to_string());

        let rt = Runtime::new().ok()?;
        Some(Self { rt, addr, player })
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    /// Submit a final score without blocking the caller. Failures are
    /// logged and dropped.
    pub fn report(&self, score: u32) {
        let addr = self.addr.clone();
        let name = self.player.clone();
        self.rt.spawn(async move {
            if let Err(e) = submit_score(&addr, &name, score).await {
                eprintln!("[scores] submit failed: {:#}", e);
            }
        });
    }
}
