//! JSON message types for the high score service.
//!
//! Line-delimited JSON; every message carries a `type` tag. Unknown or
//! malformed lines get an `error` response rather than dropping the
//! connection.

use serde::{Deserialize, Serialize};

use crate::store::HighScore;

/// Client -> server request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "addHighScore")]
    AddHighScore { name: String, score: u32 },
    #[serde(rename = "getHighScores")]
    GetHighScores,
}

/// Server -> client response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    #[serde(rename = "ack")]
    Ack,
    #[serde(rename = "highScores")]
    HighScores { entries: Vec<HighScore> },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Parse a single request line.
pub fn parse_request(line: &str) -> Result<Request, serde_json::Error> {
    serde_json::from_str(line)
}

/// Encode a response as a single line (no trailing newline).
pub fn encode_response(response: &Response) -> Result<String, serde_json::Error> {
    serde_json::to_string(response)
}
