//! UseCase: 接続受付処理
//!
//! ソケットが開いた時点では identity は未束縛。ここでは接続の送信
//! チャンネルを EventPusher に登録するだけで、identity の束縛は
//! join-global / join-room イベントで行われます。

use std::sync::Arc;

use crate::domain::{ConnectionId, EventPusher, PusherChannel};

/// 接続受付のユースケース
pub struct ConnectClientUseCase {
    /// EventPusher（接続管理とイベント送出の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(pusher: Arc<dyn EventPusher>) -> Self {
        Self { pusher }
    }

    /// 接続を受け付ける
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 新しい接続の ID
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.pusher.register_connection(connection_id, sender).await;
    }

    /// 要求元の接続へ応答イベントを送出する
    pub async fn push_to(
        &self,
        connection_id: &ConnectionId,
        json_message: &str,
    ) -> Result<(), crate::domain::EventPushError> {
        self.pusher
            .push_to_connection(connection_id, json_message)
            .await
    }
}
