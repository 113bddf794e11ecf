//! UseCase: ユーザールーム一覧取得処理
//!
//! GLOBAL ルームを先頭に、identity が参加者である全ルームを返します。
//! 各ルームにはプレビュー用の最新メッセージを 1 件添付します。
//! オフライン中に作られたバトルルームなどもここで発見されます。

use std::sync::Arc;

use crate::domain::{ChatMessage, ChatStore, PlayerId, Room};

use super::error::ChatError;
use super::global_room::GlobalRoomCache;

/// ルームとプレビュー用の最新メッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct RoomPreview {
    pub room: Room,
    pub last_message: Option<ChatMessage>,
}

/// ユーザールーム一覧取得のユースケース
pub struct GetUserRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
    /// GLOBAL ルームの解決器
    global_room: Arc<GlobalRoomCache>,
}

impl GetUserRoomsUseCase {
    /// 新しい GetUserRoomsUseCase を作成
    pub fn new(store: Arc<dyn ChatStore>, global_room: Arc<GlobalRoomCache>) -> Self {
        Self { store, global_room }
    }

    /// ルーム一覧取得を実行
    ///
    /// # Returns
    ///
    /// GLOBAL ルームを先頭にした RoomPreview のリスト
    pub async fn execute(&self, identity: &PlayerId) -> Result<Vec<RoomPreview>, ChatError> {
        // 1. GLOBAL ルームを先頭に（メンバーシップは全員暗黙）
        let global_id = self.global_room.resolve().await?;
        let global = self
            .store
            .find_room(&global_id)
            .await
            .ok_or_else(|| ChatError::NotFound(format!("room {}", global_id.as_str())))?;

        let mut rooms = vec![global];

        // 2. identity が参加者である全ルーム
        rooms.extend(self.store.list_rooms_for(identity).await);

        // 3. プレビュー用に最新メッセージを添付
        let mut previews = Vec::with_capacity(rooms.len());
        for room in rooms {
            let last_message = self.store.latest_message(&room.id).await;
            previews.push(RoomPreview { room, last_message });
        }

        Ok(previews)
    }
}
