//! UseCase: パーティルーム作成処理
//!
//! プレイヤーの明示的な操作で名前付きルームを作ります。作成者は常に
//! 参加者に含まれます。オンラインのメンバーは購読させて通知し、
//! オフラインのメンバーは get-user-rooms で発見します。

use std::sync::Arc;

use crate::domain::{
    ChatStore, EventPusher, PlayerId, Room, RoomIdFactory, RoomName, Timestamp,
};

use super::error::ChatError;

/// パーティルーム作成のユースケース
pub struct CreatePartyRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
    /// EventPusher（接続管理とイベント送出の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl CreatePartyRoomUseCase {
    /// 新しい CreatePartyRoomUseCase を作成
    pub fn new(store: Arc<dyn ChatStore>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { store, pusher }
    }

    /// パーティルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `creator` - 作成者のプレイヤー identity（必ず参加者に含まれる）
    /// * `name` - ルームの表示名
    /// * `members` - 作成者以外の初期メンバー
    pub async fn execute(
        &self,
        creator: PlayerId,
        name: RoomName,
        members: Vec<PlayerId>,
    ) -> Result<Room, ChatError> {
        use hiroba_shared::time::jst_now_millis;

        // 作成者を先頭にしたメンバーリスト（重複はエンティティ側で除去）
        let mut participants = vec![creator];
        participants.extend(members);

        let room = Room::new_party(
            RoomIdFactory::generate()?,
            name,
            participants,
            Timestamp::new(jst_now_millis()),
        );
        let room = self.store.create_room(room).await?;
        Ok(room)
    }

    /// 作成者の接続をルームの配信先に加える
    pub async fn attach_creator(&self, connection_id: &crate::domain::ConnectionId, room: &Room) {
        self.pusher.subscribe(connection_id, &room.id).await;
    }

    /// 作成者以外のオンラインメンバーを購読させて通知する
    ///
    /// 作成者へは要求元ソケットへの応答で通知済みなので除外します。
    pub async fn notify_members(
        &self,
        room: &Room,
        creator: &PlayerId,
        json_message: &str,
    ) -> Vec<PlayerId> {
        let mut delivered = Vec::new();
        for identity in &room.participants {
            if identity == creator {
                continue;
            }
            if self.pusher.subscribe_identity(identity, &room.id).await
                && self.pusher.push_to_identity(identity, json_message).await
            {
                delivered.push(identity.clone());
            }
        }
        delivered
    }
}
