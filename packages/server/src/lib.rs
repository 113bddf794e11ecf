//! Realtime chat and room-membership server library.
//!
//! This library provides the socket gateway, room/invitation service and
//! message-store abstraction for the Hiroba chat system: a WebSocket
//! gateway multiplexing many concurrently-connected clients into shared
//! rooms (global, private, party, battle) with an invitation handshake in
//! front of private rooms.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
