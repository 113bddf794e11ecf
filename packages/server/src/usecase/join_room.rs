//! UseCase: 指定ルーム参加処理
//!
//! 既存の束縛があっても上書きします（後勝ち）。参加時に参加者チェックは
//! 行いません。履歴の読み取りは書き込みより緩く、参加者ゲートは
//! 送信時（SendMessageUseCase）に掛かります。

use std::sync::Arc;

use crate::domain::{ChatStore, ConnectionId, EventPusher, PlayerId, RoomId};

use super::error::ChatError;
use super::join_global::{HISTORY_PAGE_SIZE, JoinSnapshot};

/// 指定ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
    /// EventPusher（接続管理とイベント送出の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(store: Arc<dyn ChatStore>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { store, pusher }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 要求元の接続 ID
    /// * `identity` - クライアントが名乗ったプレイヤー identity
    /// * `room_id` - 参加先ルーム ID
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        identity: PlayerId,
        room_id: RoomId,
    ) -> Result<JoinSnapshot, ChatError> {
        // 1. identity を接続に束縛（既存の束縛は上書き）
        self.pusher.bind_identity(connection_id, identity).await;

        // 2. ルームの存在確認
        let room = self
            .store
            .find_room(&room_id)
            .await
            .ok_or_else(|| ChatError::NotFound(format!("room {}", room_id.as_str())))?;

        // 3. 履歴を取得してから購読する
        let mut messages = self
            .store
            .list_messages(&room_id, HISTORY_PAGE_SIZE, 0)
            .await?;
        messages.reverse();
        self.pusher.subscribe(connection_id, &room_id).await;

        Ok(JoinSnapshot { room, messages })
    }
}
