//! UseCase: 切断処理
//!
//! 切断はその接続の束縛と購読だけを壊します。ストア上のルーム参加者
//! 記録は生きている接続と独立した永続データなので、ここでは触りません。

use std::sync::Arc;

use crate::domain::{ConnectionId, EventPusher, PlayerId};

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    /// EventPusher（接続管理とイベント送出の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(pusher: Arc<dyn EventPusher>) -> Self {
        Self { pusher }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 接続に束縛されていた identity（未束縛だったなら None）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<PlayerId> {
        self.pusher.unregister_connection(connection_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionIdFactory, RoomIdFactory};
    use crate::infrastructure::message_pusher::WebSocketEventPusher;

    fn player(id: &str) -> PlayerId {
        PlayerId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_disconnect_removes_binding_and_subscriptions() {
        // テスト項目: 切断で束縛と購読が取り除かれる
        // given (前提条件):
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = DisconnectClientUseCase::new(pusher.clone());
        let connection_id = ConnectionIdFactory::generate().unwrap();
        let room_id = RoomIdFactory::generate().unwrap();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        pusher.register_connection(connection_id.clone(), tx).await;
        pusher.bind_identity(&connection_id, player("alice")).await;
        pusher.subscribe(&connection_id, &room_id).await;

        // when (操作):
        let unbound = usecase.execute(&connection_id).await;

        // then (期待する結果):
        assert_eq!(unbound, Some(player("alice")));
        assert_eq!(pusher.connection_of(&player("alice")).await, None);
        assert_eq!(pusher.identity_of(&connection_id).await, None);
    }

    #[tokio::test]
    async fn test_disconnect_of_stale_connection_keeps_newer_binding() {
        // テスト項目: 古い接続の切断が同じ identity の新しい束縛を壊さない
        // given (前提条件): alice が接続 A で束縛した後、接続 B で束縛し直す（後勝ち）
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = DisconnectClientUseCase::new(pusher.clone());
        let conn_a = ConnectionIdFactory::generate().unwrap();
        let conn_b = ConnectionIdFactory::generate().unwrap();
        let (tx_a, _rx_a) = tokio::sync::mpsc::unbounded_channel();
        let (tx_b, _rx_b) = tokio::sync::mpsc::unbounded_channel();
        pusher.register_connection(conn_a.clone(), tx_a).await;
        pusher.register_connection(conn_b.clone(), tx_b).await;
        pusher.bind_identity(&conn_a, player("alice")).await;
        pusher.bind_identity(&conn_b, player("alice")).await;

        // when (操作): 古い接続 A が切断される
        usecase.execute(&conn_a).await;

        // then (期待する結果): alice の現在の接続は B のまま
        assert_eq!(pusher.connection_of(&player("alice")).await, Some(conn_b));
    }
}
