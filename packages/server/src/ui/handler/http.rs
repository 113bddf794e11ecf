//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{BattleRef, PlayerId, RoomId},
    infrastructure::dto::{
        http::{
            CreateBattleRoomRequest, CreateBattleRoomResponse, RoomDetailDto, RoomSummaryDto,
        },
        websocket::ServerEvent,
    },
    ui::state::AppState,
    usecase::ChatError,
};
use hiroba_shared::time::format_jst_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            id: room.id.as_str().to_string(),
            kind: room.kind.into(),
            participants: room
                .participants
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            created_at: format_jst_rfc3339(room.created_at.value()),
        })
        .collect();

    Json(summaries)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::BAD_REQUEST)?;
    match state.get_room_detail_usecase.execute(&room_id).await {
        Ok(room) => {
            // Domain Model から DTO への変換
            let detail = RoomDetailDto {
                id: room.id.as_str().to_string(),
                kind: room.kind.into(),
                name: room.name.map(|n| n.as_str().to_string()),
                battle_ref: room.battle_ref.map(|r| r.as_str().to_string()),
                participants: room
                    .participants
                    .iter()
                    .map(|p| p.as_str().to_string())
                    .collect(),
                created_at: format_jst_rfc3339(room.created_at.value()),
            };
            Ok(Json(detail))
        }
        Err(ChatError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// Create a battle room (privileged trigger from the combat subsystem).
///
/// Not a client event: the combat subsystem calls this while clients are
/// mid-session. Online participants get subscribed and receive a
/// battle-room-created push; offline ones discover the room via
/// get-user-rooms.
pub async fn create_battle_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBattleRoomRequest>,
) -> Result<(StatusCode, Json<CreateBattleRoomResponse>), StatusCode> {
    let battle_ref =
        BattleRef::new(request.battle_ref).map_err(|_| StatusCode::BAD_REQUEST)?;
    let player_a = PlayerId::new(request.player_a).map_err(|_| StatusCode::BAD_REQUEST)?;
    let player_b = PlayerId::new(request.player_b).map_err(|_| StatusCode::BAD_REQUEST)?;

    let room = state
        .create_battle_room_usecase
        .execute(battle_ref.clone(), player_a, player_b)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create battle room: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let event = ServerEvent::BattleRoomCreated {
        room: room.clone().into(),
        battle_ref: battle_ref.as_str().to_string(),
    };
    let json = serde_json::to_string(&event).unwrap();
    let notified = state
        .create_battle_room_usecase
        .attach_and_notify(&room, &json)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(CreateBattleRoomResponse {
            room_id: room.id.into_string(),
            notified: notified.into_iter().map(|p| p.into_string()).collect(),
        }),
    ))
}
