//! UseCase: ルーム詳細取得処理（運用 API 向け）

use std::sync::Arc;

use crate::domain::{ChatStore, Room, RoomId};

use super::error::ChatError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    /// ルーム詳細を取得
    pub async fn execute(&self, room_id: &RoomId) -> Result<Room, ChatError> {
        self.store
            .find_room(room_id)
            .await
            .ok_or_else(|| ChatError::NotFound(format!("room {}", room_id.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomIdFactory, Timestamp};
    use crate::infrastructure::repository::InMemoryChatStore;

    #[tokio::test]
    async fn test_returns_room_by_id() {
        // テスト項目: ID で指定したルームが返される
        // given (前提条件):
        let store = Arc::new(InMemoryChatStore::new());
        let room = store
            .create_room(Room::new_global(
                RoomIdFactory::generate().unwrap(),
                Timestamp::new(1000),
            ))
            .await
            .unwrap();
        let usecase = GetRoomDetailUseCase::new(store);

        // when (操作):
        let found = usecase.execute(&room.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(found, room);
    }

    #[tokio::test]
    async fn test_unknown_room_fails_with_not_found() {
        // テスト項目: 存在しないルームが NotFound で失敗する
        // given (前提条件):
        let store = Arc::new(InMemoryChatStore::new());
        let usecase = GetRoomDetailUseCase::new(store);

        // when (操作):
        let result = usecase.execute(&RoomIdFactory::generate().unwrap()).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ChatError::NotFound(_))));
    }
}
