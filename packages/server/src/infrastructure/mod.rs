//! Infrastructure 層
//!
//! ドメイン層が定義するポート（`ChatStore`, `EventPusher`,
//! `PlayerDirectory`）の具体的な実装と、WebSocket/HTTP の DTO 定義。

pub mod directory;
pub mod dto;
pub mod message_pusher;
pub mod repository;
