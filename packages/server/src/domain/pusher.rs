//! EventPusher trait 定義
//!
//! ゲートウェイが必要とする「生きている接続」への送出インターフェース。
//! 接続と identity の束縛、ルーム購読、ファンアウトの 3 つの関心を
//! 一つのポートにまとめています。具体的な実装（WebSocket + mpsc）は
//! Infrastructure 層が提供します。
//!
//! ## 束縛のセマンティクス
//!
//! - 1 つの接続はたかだか 1 つの identity に束縛される
//! - 1 つの identity の「現在の接続」はたかだか 1 つ（後勝ち）
//! - 切断はその接続の束縛だけを壊す。identity が既に別の接続へ
//!   束縛し直されていた場合、その新しい束縛には触れない

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::EventPushError;
use super::value_object::{ConnectionId, PlayerId, RoomId};

/// クライアントへのメッセージ送信用チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 生きている接続へのイベント送出インターフェース
#[async_trait]
pub trait EventPusher: Send + Sync {
    /// 接続を登録（identity の束縛はまだ無い）
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を破棄し、その接続の束縛と購読を全て取り除く
    ///
    /// 束縛されていた identity を返します（ログ用）。
    async fn unregister_connection(&self, connection_id: &ConnectionId) -> Option<PlayerId>;

    /// 接続に identity を束縛（identity 側の既存束縛は後勝ちで上書き）
    async fn bind_identity(&self, connection_id: &ConnectionId, identity: PlayerId);

    /// 接続に束縛された identity を取得
    async fn identity_of(&self, connection_id: &ConnectionId) -> Option<PlayerId>;

    /// identity の現在の接続を取得
    async fn connection_of(&self, identity: &PlayerId) -> Option<ConnectionId>;

    /// 接続をルームの配信先に加える
    async fn subscribe(&self, connection_id: &ConnectionId, room_id: &RoomId);

    /// 接続をルームの配信先から外す
    async fn unsubscribe(&self, connection_id: &ConnectionId, room_id: &RoomId);

    /// identity の現在の接続をルームの配信先に加える
    ///
    /// identity がオフラインなら何もせず false を返します。
    async fn subscribe_identity(&self, identity: &PlayerId, room_id: &RoomId) -> bool;

    /// 特定の接続へイベントを送出
    async fn push_to_connection(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), EventPushError>;

    /// identity の現在の接続へイベントを送出（ベストエフォート）
    ///
    /// 配送できたら true。オフラインなら何もせず false を返します。
    /// 配送保証はなく、オフライン宛の通知はキューされません。
    async fn push_to_identity(&self, identity: &PlayerId, content: &str) -> bool;

    /// ルームの全購読接続へイベントを送出（送信者自身も含む）
    async fn broadcast_room(&self, room_id: &RoomId, content: &str);
}
