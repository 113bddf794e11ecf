//! DTO 定義
//!
//! ワイヤ上の表現（JSON）とドメインモデルの変換境界。

pub mod conversion;
pub mod http;
pub mod websocket;
