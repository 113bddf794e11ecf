//! UI 層（トランスポート境界）
//!
//! axum のルーター、WebSocket/HTTP ハンドラ、共有状態。

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::{Server, build_router};
pub use state::AppState;
