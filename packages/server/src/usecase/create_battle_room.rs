//! UseCase: バトルルーム作成処理
//!
//! クライアントイベントではなく、戦闘サブシステムからの外部トリガで
//! 呼ばれます。バトルルームは再利用せず毎回新規作成します。オンラインの
//! 参加者だけを購読させて通知し、オフラインの参加者は次の
//! get-user-rooms で新しいルームを発見します。

use std::sync::Arc;

use crate::domain::{
    BattleRef, ChatStore, EventPusher, PlayerId, Room, RoomIdFactory, Timestamp,
};

use super::error::ChatError;

/// バトルルーム作成のユースケース
pub struct CreateBattleRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
    /// EventPusher（接続管理とイベント送出の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl CreateBattleRoomUseCase {
    /// 新しい CreateBattleRoomUseCase を作成
    pub fn new(store: Arc<dyn ChatStore>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { store, pusher }
    }

    /// バトルルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `battle_ref` - 戦闘サブシステム側の戦闘 ID
    /// * `a`, `b` - 対戦する 2 プレイヤーの identity
    pub async fn execute(
        &self,
        battle_ref: BattleRef,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<Room, ChatError> {
        use hiroba_shared::time::jst_now_millis;

        let room = Room::new_battle(
            RoomIdFactory::generate()?,
            battle_ref,
            a,
            b,
            Timestamp::new(jst_now_millis()),
        );
        let room = self.store.create_room(room).await?;
        tracing::info!(
            "Battle room {} created for ({}, {})",
            room.id.as_str(),
            room.participants[0].as_str(),
            room.participants[1].as_str()
        );
        Ok(room)
    }

    /// オンラインの参加者を購読させて通知する
    ///
    /// # Returns
    ///
    /// 通知が配送できた参加者の identity リスト
    pub async fn attach_and_notify(&self, room: &Room, json_message: &str) -> Vec<PlayerId> {
        let mut delivered = Vec::new();
        for identity in &room.participants {
            if self.pusher.subscribe_identity(identity, &room.id).await
                && self.pusher.push_to_identity(identity, json_message).await
            {
                delivered.push(identity.clone());
            }
        }
        delivered
    }
}
