use std::io;
use thiserror::Error;

/// Failures of a single decision tick.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("player `{0}` is not in the current snapshot")]
    PlayerNotFound(String),
    #[error("grid of {width}x{height} cannot hold {cells} cells")]
    GridShape { width: i32, height: i32, cells: usize },
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("could not connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },
    #[error("connection i/o: {0}")]
    Io(#[from] io::Error),
    #[error("malformed message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("server rejected session: {0}")]
    Rejected(String),
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] EngineError),
    #[error("session ended")]
    SessionEnded,
}
