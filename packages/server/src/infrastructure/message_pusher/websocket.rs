//! WebSocket を使った EventPusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` の管理
//! - 接続 ↔ identity の双方向束縛（後勝ち）
//! - ルームごとの購読集合の管理
//! - ターゲット送出（push_to_*）とルームブロードキャスト
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、送出だけを担います。
//!
//! 束縛は 2 つのマップで持ちます：
//!
//! - `identities`: 接続 → identity（その接続のイベントでのみ変更される）
//! - `connections`: identity → 現在の接続（どの bind でも後勝ちで上書き）
//!
//! 切断時、`connections` 側は「まだ自分を指している場合」だけ消します。
//! 同じ identity が既に別の接続で束縛し直していた場合、その新しい束縛を
//! 巻き添えにしないためです。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, EventPushError, EventPusher, PlayerId, PusherChannel, RoomId,
};

#[derive(Default)]
struct RegistryInner {
    /// 接続ごとの送出チャンネル
    senders: HashMap<ConnectionId, PusherChannel>,
    /// 接続 → identity
    identities: HashMap<ConnectionId, PlayerId>,
    /// identity → 現在の接続（後勝ち）
    connections: HashMap<PlayerId, ConnectionId>,
    /// ルーム → 購読接続の集合
    subscriptions: HashMap<RoomId, HashSet<ConnectionId>>,
}

/// WebSocket を使った EventPusher 実装
pub struct WebSocketEventPusher {
    inner: Mutex<RegistryInner>,
}

impl WebSocketEventPusher {
    /// 新しい WebSocketEventPusher を作成
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner::default()),
        }
    }
}

impl Default for WebSocketEventPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPusher for WebSocketEventPusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut inner = self.inner.lock().await;
        inner.senders.insert(connection_id.clone(), sender);
        tracing::debug!("Connection '{}' registered", connection_id.as_str());
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) -> Option<PlayerId> {
        let mut inner = self.inner.lock().await;
        inner.senders.remove(connection_id);
        for subscribers in inner.subscriptions.values_mut() {
            subscribers.remove(connection_id);
        }

        let identity = inner.identities.remove(connection_id);
        if let Some(identity) = &identity {
            // 新しい接続に束縛が移っていたら、そちらは壊さない
            if inner.connections.get(identity) == Some(connection_id) {
                inner.connections.remove(identity);
            }
        }
        tracing::debug!("Connection '{}' unregistered", connection_id.as_str());
        identity
    }

    async fn bind_identity(&self, connection_id: &ConnectionId, identity: PlayerId) {
        let mut inner = self.inner.lock().await;
        inner
            .identities
            .insert(connection_id.clone(), identity.clone());
        // 後勝ち: identity の宛先はこの接続になる
        inner
            .connections
            .insert(identity.clone(), connection_id.clone());
        tracing::debug!(
            "Identity '{}' bound to connection '{}'",
            identity.as_str(),
            connection_id.as_str()
        );
    }

    async fn identity_of(&self, connection_id: &ConnectionId) -> Option<PlayerId> {
        let inner = self.inner.lock().await;
        inner.identities.get(connection_id).cloned()
    }

    async fn connection_of(&self, identity: &PlayerId) -> Option<ConnectionId> {
        let inner = self.inner.lock().await;
        inner.connections.get(identity).cloned()
    }

    async fn subscribe(&self, connection_id: &ConnectionId, room_id: &RoomId) {
        let mut inner = self.inner.lock().await;
        inner
            .subscriptions
            .entry(room_id.clone())
            .or_default()
            .insert(connection_id.clone());
    }

    async fn unsubscribe(&self, connection_id: &ConnectionId, room_id: &RoomId) {
        let mut inner = self.inner.lock().await;
        if let Some(subscribers) = inner.subscriptions.get_mut(room_id) {
            subscribers.remove(connection_id);
        }
    }

    async fn subscribe_identity(&self, identity: &PlayerId, room_id: &RoomId) -> bool {
        let mut inner = self.inner.lock().await;
        let Some(connection_id) = inner.connections.get(identity).cloned() else {
            return false;
        };
        inner
            .subscriptions
            .entry(room_id.clone())
            .or_default()
            .insert(connection_id);
        true
    }

    async fn push_to_connection(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), EventPushError> {
        let inner = self.inner.lock().await;
        let sender = inner.senders.get(connection_id).ok_or_else(|| {
            EventPushError::ConnectionNotFound(connection_id.as_str().to_string())
        })?;
        sender
            .send(content.to_string())
            .map_err(|e| EventPushError::PushFailed(e.to_string()))
    }

    async fn push_to_identity(&self, identity: &PlayerId, content: &str) -> bool {
        let inner = self.inner.lock().await;
        let Some(connection_id) = inner.connections.get(identity) else {
            return false;
        };
        let Some(sender) = inner.senders.get(connection_id) else {
            return false;
        };
        if let Err(e) = sender.send(content.to_string()) {
            tracing::warn!(
                "Failed to push to identity '{}': {}",
                identity.as_str(),
                e
            );
            return false;
        }
        true
    }

    async fn broadcast_room(&self, room_id: &RoomId, content: &str) {
        let inner = self.inner.lock().await;
        let Some(subscribers) = inner.subscriptions.get(room_id) else {
            return;
        };
        for connection_id in subscribers {
            if let Some(sender) = inner.senders.get(connection_id) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!(
                        "Failed to push to connection '{}' during broadcast: {}",
                        connection_id.as_str(),
                        e
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionIdFactory, RoomIdFactory};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 束縛の後勝ちセマンティクスと切断時の巻き添え防止
    // - 購読集合に基づくブロードキャストのスコープ
    // - ターゲット送出のベストエフォート性
    // ========================================

    fn player(id: &str) -> PlayerId {
        PlayerId::new(id.to_string()).unwrap()
    }

    async fn connect(
        pusher: &WebSocketEventPusher,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let connection_id = ConnectionIdFactory::generate().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        pusher.register_connection(connection_id.clone(), tx).await;
        (connection_id, rx)
    }

    #[tokio::test]
    async fn test_last_bind_wins_for_identity() {
        // テスト項目: 同じ identity の 2 回目の束縛が宛先を奪う（後勝ち）
        // given (前提条件): alice が接続 A に束縛済み
        let pusher = WebSocketEventPusher::new();
        let (conn_a, mut rx_a) = connect(&pusher).await;
        let (conn_b, mut rx_b) = connect(&pusher).await;
        pusher.bind_identity(&conn_a, player("alice")).await;

        // when (操作): alice が接続 B で束縛し直す
        pusher.bind_identity(&conn_b, player("alice")).await;
        let delivered = pusher.push_to_identity(&player("alice"), "hello").await;

        // then (期待する結果): B にだけ届く
        assert!(delivered);
        assert_eq!(rx_b.recv().await, Some("hello".to_string()));
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stale_disconnect_does_not_break_new_binding() {
        // テスト項目: 古い接続の切断が新しい束縛を壊さない
        // given (前提条件): alice が A → B の順で束縛
        let pusher = WebSocketEventPusher::new();
        let (conn_a, _rx_a) = connect(&pusher).await;
        let (conn_b, mut rx_b) = connect(&pusher).await;
        pusher.bind_identity(&conn_a, player("alice")).await;
        pusher.bind_identity(&conn_b, player("alice")).await;

        // when (操作): A を切断してから alice 宛に送出する
        let unbound = pusher.unregister_connection(&conn_a).await;
        let delivered = pusher.push_to_identity(&player("alice"), "still here").await;

        // then (期待する結果): A の束縛は返るが、宛先は B のまま
        assert_eq!(unbound, Some(player("alice")));
        assert!(delivered);
        assert_eq!(rx_b.recv().await, Some("still here".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_scope_is_exactly_the_subscriber_set() {
        // テスト項目: ブロードキャストが購読接続の全員に届き、他には届かない
        // given (前提条件): room に 2 接続、部外の接続が 1 つ
        let pusher = WebSocketEventPusher::new();
        let room = RoomIdFactory::generate().unwrap();
        let (conn1, mut rx1) = connect(&pusher).await;
        let (conn2, mut rx2) = connect(&pusher).await;
        let (_conn3, mut rx3) = connect(&pusher).await;
        pusher.subscribe(&conn1, &room).await;
        pusher.subscribe(&conn2, &room).await;

        // when (操作):
        pusher.broadcast_room(&room, "to the room").await;

        // then (期待する結果):
        assert_eq!(rx1.recv().await, Some("to the room".to_string()));
        assert_eq!(rx2.recv().await, Some("to the room".to_string()));
        assert!(rx3.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_push_to_offline_identity_returns_false() {
        // テスト項目: 束縛の無い identity への送出が false を返す
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();

        // when (操作):
        let delivered = pusher.push_to_identity(&player("ghost"), "anyone?").await;

        // then (期待する結果):
        assert!(!delivered);
    }

    #[tokio::test]
    async fn test_push_to_unknown_connection_fails() {
        // テスト項目: 未登録の接続への送出が ConnectionNotFound で失敗する
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let unknown = ConnectionIdFactory::generate().unwrap();

        // when (操作):
        let result = pusher.push_to_connection(&unknown, "hello").await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(EventPushError::ConnectionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_subscribe_identity_requires_live_connection() {
        // テスト項目: オフラインの identity の購読は何もせず false を返す
        // given (前提条件): bob はオンライン、ghost はオフライン
        let pusher = WebSocketEventPusher::new();
        let room = RoomIdFactory::generate().unwrap();
        let (conn, mut rx) = connect(&pusher).await;
        pusher.bind_identity(&conn, player("bob")).await;

        // when (操作):
        let online = pusher.subscribe_identity(&player("bob"), &room).await;
        let offline = pusher.subscribe_identity(&player("ghost"), &room).await;
        pusher.broadcast_room(&room, "hi").await;

        // then (期待する結果):
        assert!(online);
        assert!(!offline);
        assert_eq!(rx.recv().await, Some("hi".to_string()));
    }

    #[tokio::test]
    async fn test_unsubscribe_removes_connection_from_room() {
        // テスト項目: 購読解除後はブロードキャストが届かない
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let room = RoomIdFactory::generate().unwrap();
        let (conn, mut rx) = connect(&pusher).await;
        pusher.subscribe(&conn, &room).await;

        // when (操作):
        pusher.unsubscribe(&conn, &room).await;
        pusher.broadcast_room(&room, "gone").await;

        // then (期待する結果):
        assert!(rx.try_recv().is_err());
    }
}
