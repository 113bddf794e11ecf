//! UseCase: 履歴取得処理
//!
//! ストアからは新しい順のページを取得し、クライアントへ返す前に
//! 古い順へ並べ直します。offset は「新しい側から何件飛ばすか」で、
//! 過去方向へのページングに使われます。

use std::sync::Arc;

use crate::domain::{ChatMessage, ChatStore, RoomId};

use super::error::ChatError;
use super::join_global::HISTORY_PAGE_SIZE;

/// 履歴取得のユースケース
pub struct GetMessagesUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
}

impl GetMessagesUseCase {
    /// 新しい GetMessagesUseCase を作成
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    /// 履歴取得を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルーム ID
    /// * `limit` - ページ件数（None なら 50）
    /// * `offset` - 新しい側からのスキップ数（None なら 0）
    ///
    /// # Returns
    ///
    /// ページ内で古い順に並んだメッセージ列
    pub async fn execute(
        &self,
        room_id: &RoomId,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let limit = limit.unwrap_or(HISTORY_PAGE_SIZE);
        let offset = offset.unwrap_or(0);

        let mut messages = self.store.list_messages(room_id, limit, offset).await?;
        messages.reverse();
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MessageContent, MessageIdFactory, PlayerId, Room, RoomIdFactory, Timestamp,
    };
    use crate::infrastructure::repository::InMemoryChatStore;

    fn player(id: &str) -> PlayerId {
        PlayerId::new(id.to_string()).unwrap()
    }

    async fn create_room_with_messages(store: &InMemoryChatStore, count: usize) -> RoomId {
        let room = store
            .create_room(Room::new_global(
                RoomIdFactory::generate().unwrap(),
                Timestamp::new(0),
            ))
            .await
            .unwrap();
        for i in 0..count {
            let message = ChatMessage::new(
                MessageIdFactory::generate().unwrap(),
                room.id.clone(),
                player("alice"),
                "alice".to_string(),
                MessageContent::new(format!("msg-{i}")).unwrap(),
                Timestamp::new(1000 + i as i64),
            );
            store.append_message(message).await.unwrap();
        }
        room.id
    }

    #[tokio::test]
    async fn test_history_round_trip_preserves_insertion_order() {
        // テスト項目: k 件挿入したルームの履歴が挿入順（古い順）で返される
        // given (前提条件):
        let store = Arc::new(InMemoryChatStore::new());
        let room_id = create_room_with_messages(&store, 5).await;
        let usecase = GetMessagesUseCase::new(store);

        // when (操作):
        let messages = usecase.execute(&room_id, Some(5), Some(0)).await.unwrap();

        // then (期待する結果):
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["msg-0", "msg-1", "msg-2", "msg-3", "msg-4"]);
    }

    #[tokio::test]
    async fn test_offset_pages_backward_in_time() {
        // テスト項目: offset が新しい側からのスキップとして効く
        // given (前提条件): 5 件のメッセージ
        let store = Arc::new(InMemoryChatStore::new());
        let room_id = create_room_with_messages(&store, 5).await;
        let usecase = GetMessagesUseCase::new(store);

        // when (操作): 新しい 2 件を飛ばして 2 件取得
        let messages = usecase.execute(&room_id, Some(2), Some(2)).await.unwrap();

        // then (期待する結果): 古い順で msg-1, msg-2
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["msg-1", "msg-2"]);
    }

    #[tokio::test]
    async fn test_defaults_apply_when_limit_and_offset_omitted() {
        // テスト項目: limit/offset 未指定時に既定値（50 件、先頭から）が使われる
        // given (前提条件): 60 件のメッセージ
        let store = Arc::new(InMemoryChatStore::new());
        let room_id = create_room_with_messages(&store, 60).await;
        let usecase = GetMessagesUseCase::new(store);

        // when (操作):
        let messages = usecase.execute(&room_id, None, None).await.unwrap();

        // then (期待する結果): 新しい 50 件が古い順で返る
        assert_eq!(messages.len(), HISTORY_PAGE_SIZE);
        assert_eq!(messages[0].content.as_str(), "msg-10");
        assert_eq!(messages[49].content.as_str(), "msg-59");
    }

    #[tokio::test]
    async fn test_nonexistent_room_fails_with_not_found() {
        // テスト項目: 存在しないルームの履歴取得が NotFound で失敗する
        // given (前提条件):
        let store = Arc::new(InMemoryChatStore::new());
        let usecase = GetMessagesUseCase::new(store);

        // when (操作):
        let result = usecase
            .execute(&RoomIdFactory::generate().unwrap(), None, None)
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(ChatError::NotFound(_))));
    }
}
