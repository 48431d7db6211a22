//! Standalone high score service.
//!
//! Bind address comes from `BLOCKFALL_SCORES_ADDR` (default 127.0.0.1:7878).

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use blockfall_scores::{run_server, ScoreStore, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env();
    let store = Arc::new(RwLock::new(ScoreStore::new()));
    run_server(config, store, None).await
}
