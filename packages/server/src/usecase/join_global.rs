//! UseCase: GLOBAL ルーム参加処理
//!
//! identity の束縛を作り、GLOBAL ルームを解決して接続を購読させ、
//! 直近の履歴スナップショットを返します。スナップショットの返送先は
//! 要求元のソケットだけです。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinGlobalUseCase::execute() メソッド
//! - identity の束縛、GLOBAL ルームの解決、履歴の時系列順
//!
//! ### なぜこのテストが必要か
//! - 束縛は後続の宛先解決（招待通知など）の前提になる
//! - 履歴は新しい順で取得したページを古い順へ並べ直して返す契約がある

use std::sync::Arc;

use crate::domain::{ChatMessage, ChatStore, ConnectionId, EventPusher, PlayerId, Room};

use super::error::ChatError;
use super::global_room::GlobalRoomCache;

/// 参加時に返す履歴スナップショットの件数
pub const HISTORY_PAGE_SIZE: usize = 50;

/// 参加結果（ルームと時系列順の履歴）
#[derive(Debug, Clone, PartialEq)]
pub struct JoinSnapshot {
    pub room: Room,
    pub messages: Vec<ChatMessage>,
}

/// GLOBAL ルーム参加のユースケース
pub struct JoinGlobalUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
    /// EventPusher（接続管理とイベント送出の抽象化）
    pusher: Arc<dyn EventPusher>,
    /// GLOBAL ルームの解決器
    global_room: Arc<GlobalRoomCache>,
}

impl JoinGlobalUseCase {
    /// 新しい JoinGlobalUseCase を作成
    pub fn new(
        store: Arc<dyn ChatStore>,
        pusher: Arc<dyn EventPusher>,
        global_room: Arc<GlobalRoomCache>,
    ) -> Self {
        Self {
            store,
            pusher,
            global_room,
        }
    }

    /// GLOBAL ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 要求元の接続 ID
    /// * `identity` - クライアントが名乗ったプレイヤー identity
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        identity: PlayerId,
    ) -> Result<JoinSnapshot, ChatError> {
        // 1. identity を接続に束縛（後勝ち）
        self.pusher.bind_identity(connection_id, identity).await;

        // 2. GLOBAL ルームを解決
        let room_id = self.global_room.resolve().await?;
        let room = self
            .store
            .find_room(&room_id)
            .await
            .ok_or_else(|| ChatError::NotFound(format!("room {}", room_id.as_str())))?;

        // 3. 履歴を取得してから購読する（取得と購読の間の取りこぼしは許容）
        let mut messages = self
            .store
            .list_messages(&room_id, HISTORY_PAGE_SIZE, 0)
            .await?;
        messages.reverse();
        self.pusher.subscribe(connection_id, &room_id).await;

        Ok(JoinSnapshot { room, messages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConnectionIdFactory, MessageContent, MessageIdFactory, RoomKind, Timestamp,
    };
    use crate::infrastructure::message_pusher::WebSocketEventPusher;
    use crate::infrastructure::repository::InMemoryChatStore;

    fn player(id: &str) -> PlayerId {
        PlayerId::new(id.to_string()).unwrap()
    }

    struct Fixture {
        store: Arc<InMemoryChatStore>,
        pusher: Arc<WebSocketEventPusher>,
        usecase: JoinGlobalUseCase,
    }

    fn create_fixture() -> Fixture {
        let store = Arc::new(InMemoryChatStore::new());
        let pusher = Arc::new(WebSocketEventPusher::new());
        let global_room = Arc::new(GlobalRoomCache::new(store.clone()));
        let usecase = JoinGlobalUseCase::new(store.clone(), pusher.clone(), global_room);
        Fixture {
            store,
            pusher,
            usecase,
        }
    }

    async fn connect(pusher: &WebSocketEventPusher) -> ConnectionId {
        let connection_id = ConnectionIdFactory::generate().unwrap();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        pusher.register_connection(connection_id.clone(), tx).await;
        connection_id
    }

    #[tokio::test]
    async fn test_join_global_binds_identity_and_returns_room() {
        // テスト項目: 参加で identity が束縛され GLOBAL ルームが返される
        // given (前提条件):
        let fixture = create_fixture();
        let connection_id = connect(&fixture.pusher).await;

        // when (操作):
        let snapshot = fixture
            .usecase
            .execute(&connection_id, player("alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.room.kind, RoomKind::Global);
        assert!(snapshot.messages.is_empty());
        assert_eq!(
            fixture.pusher.identity_of(&connection_id).await,
            Some(player("alice"))
        );
        assert_eq!(
            fixture.pusher.connection_of(&player("alice")).await,
            Some(connection_id)
        );
    }

    #[tokio::test]
    async fn test_join_global_returns_history_in_chronological_order() {
        // テスト項目: 参加スナップショットの履歴が古い順で返される
        // given (前提条件): GLOBAL ルームに 3 件のメッセージを入れておく
        let fixture = create_fixture();
        let connection_id = connect(&fixture.pusher).await;
        let first = fixture
            .usecase
            .execute(&connection_id, player("alice"))
            .await
            .unwrap();
        for (i, text) in ["one", "two", "three"].iter().enumerate() {
            let message = ChatMessage::new(
                MessageIdFactory::generate().unwrap(),
                first.room.id.clone(),
                player("alice"),
                "alice".to_string(),
                MessageContent::new(text.to_string()).unwrap(),
                Timestamp::new(1000 + i as i64),
            );
            fixture.store.append_message(message).await.unwrap();
        }

        // when (操作): 別の接続で参加する
        let other = connect(&fixture.pusher).await;
        let snapshot = fixture.usecase.execute(&other, player("bob")).await.unwrap();

        // then (期待する結果): 古い順
        let contents: Vec<&str> = snapshot
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_rebind_on_second_tab_steals_identity_routing() {
        // テスト項目: 同じ identity の再参加（別タブ）で宛先が新しい接続に移る（後勝ち）
        // given (前提条件):
        let fixture = create_fixture();
        let conn_a = connect(&fixture.pusher).await;
        fixture
            .usecase
            .execute(&conn_a, player("alice"))
            .await
            .unwrap();

        // when (操作): alice が別の接続から参加し直す
        let conn_b = connect(&fixture.pusher).await;
        fixture
            .usecase
            .execute(&conn_b, player("alice"))
            .await
            .unwrap();

        // then (期待する結果): alice の現在の接続は B
        assert_eq!(
            fixture.pusher.connection_of(&player("alice")).await,
            Some(conn_b)
        );
    }
}
