//! Shared utilities for the Hiroba chat system.
//!
//! Time handling and logging setup used by both the server and the CLI
//! client binaries.

pub mod logger;
pub mod time;
