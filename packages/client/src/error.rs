//! Client error definitions.

use thiserror::Error;

/// Errors surfaced by the CLI client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("no active room (join one first)")]
    NoActiveRoom,
}
