//! HTTP API の DTO 定義

use serde::{Deserialize, Serialize};

/// GET /api/rooms の 1 要素
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub kind: String,
    pub participants: Vec<String>,
    pub created_at: String,
}

/// GET /api/rooms/{room_id} の応答
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub battle_ref: Option<String>,
    pub participants: Vec<String>,
    pub created_at: String,
}

/// POST /internal/battle-rooms の要求（戦闘サブシステムからの外部トリガ）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBattleRoomRequest {
    pub battle_ref: String,
    pub player_a: String,
    pub player_b: String,
}

/// POST /internal/battle-rooms の応答
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBattleRoomResponse {
    pub room_id: String,
    pub notified: Vec<String>,
}
