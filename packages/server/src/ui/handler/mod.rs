//! Request handlers (WebSocket + HTTP).

pub mod http;
pub mod websocket;

pub use http::{create_battle_room, get_room_detail, get_rooms, health_check};
pub use websocket::websocket_handler;
