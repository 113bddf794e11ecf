//! UseCase: ルーム退出処理
//!
//! 接続をルームの配信先から外すだけ。ストア上の参加者記録には触れず、
//! 応答イベントも返しません。

use std::sync::Arc;

use crate::domain::{ConnectionId, EventPusher, RoomId};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// EventPusher（接続管理とイベント送出の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(pusher: Arc<dyn EventPusher>) -> Self {
        Self { pusher }
    }

    /// ルーム退出を実行
    pub async fn execute(&self, connection_id: &ConnectionId, room_id: &RoomId) {
        self.pusher.unsubscribe(connection_id, room_id).await;
    }
}
