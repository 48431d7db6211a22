//! High score backend and client.
//!
//! A small line-delimited JSON service over TCP: hosts submit a final score
//! with `addHighScore` and read the ordered table back with `getHighScores`.
//! The store is in-memory and ordered by score descending. The client side
//! exposes a fire-and-forget reporter so the sync game loop never blocks on
//! the network.

pub mod client;
pub mod protocol;
pub mod server;
pub mod store;

pub use client::{fetch_high_scores, submit_score, ScoreReporter};
pub use protocol::{Request, Response};
pub use server::{run_server, ServerConfig};
pub use store::{HighScore, ScoreStore};
