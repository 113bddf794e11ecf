//! UseCase: 招待応答処理
//!
//! pending の招待だけが応答でき、受諾・拒否はどちらも終端です。同じ
//! 招待への 2 回目の応答は常に Conflict で失敗します（二重受諾ガード）。
//! 受諾時は参加者ペアの PRIVATE ルームを再利用または新規作成します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RespondInvitationUseCase::execute() メソッド
//! - 招待状態機械の終端性と PRIVATE ルームの再利用
//!
//! ### なぜこのテストが必要か
//! - 二重受諾は同じペアのルーム重複や通知の二重送出につながる
//! - ルーム再利用は「同じ 2 人のプライベートルームは 1 つ」の根拠

use std::sync::Arc;

use crate::domain::{
    ChatStore, EventPusher, Invitation, InvitationId, InvitationStatus, PlayerId,
    RepositoryError, Room, RoomIdFactory, Timestamp,
};

use super::error::ChatError;

/// 招待応答の結果
#[derive(Debug, Clone, PartialEq)]
pub struct InvitationOutcome {
    pub invitation: Invitation,
    /// 受諾時のみ（再利用または新規作成された PRIVATE ルーム）
    pub room: Option<Room>,
}

/// 招待応答のユースケース
pub struct RespondInvitationUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
    /// EventPusher（接続管理とイベント送出の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl RespondInvitationUseCase {
    /// 新しい RespondInvitationUseCase を作成
    pub fn new(store: Arc<dyn ChatStore>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { store, pusher }
    }

    /// 招待応答を実行
    ///
    /// # Arguments
    ///
    /// * `invitation_id` - 応答する招待の ID
    /// * `accept` - true なら受諾、false なら拒否
    pub async fn execute(
        &self,
        invitation_id: &InvitationId,
        accept: bool,
    ) -> Result<InvitationOutcome, ChatError> {
        // 1. 招待の存在確認
        let invitation = self
            .store
            .find_invitation(invitation_id)
            .await
            .ok_or_else(|| {
                ChatError::NotFound(format!("invitation {}", invitation_id.as_str()))
            })?;

        // 2. 状態遷移（pending 以外からはストアが InvitationNotPending を返す）
        let next = if accept {
            InvitationStatus::Accepted
        } else {
            InvitationStatus::Rejected
        };
        let invitation = self
            .store
            .update_invitation_status(invitation_id, next)
            .await?;

        // 3. 受諾ならペアの PRIVATE ルームを用意
        let room = if accept {
            Some(
                self.create_or_reuse_private_room(&invitation.from, &invitation.to)
                    .await?,
            )
        } else {
            None
        };

        Ok(InvitationOutcome { invitation, room })
    }

    /// 参加者ペアの PRIVATE ルームを再利用または新規作成
    ///
    /// ペアは順序不問で照合します。同時作成に敗けた場合はストアの
    /// 一意制約違反を合図に再検索して既存ルームへ合流します。
    pub async fn create_or_reuse_private_room(
        &self,
        a: &PlayerId,
        b: &PlayerId,
    ) -> Result<Room, ChatError> {
        use hiroba_shared::time::jst_now_millis;

        if let Some(room) = self.store.find_private_room_for_pair(a, b).await {
            return Ok(room);
        }

        let room = Room::new_private(
            RoomIdFactory::generate()?,
            a.clone(),
            b.clone(),
            Timestamp::new(jst_now_millis()),
        );
        match self.store.create_room(room).await {
            Ok(room) => Ok(room),
            Err(RepositoryError::DuplicatePrivateRoom { .. }) => self
                .store
                .find_private_room_for_pair(a, b)
                .await
                .ok_or_else(|| ChatError::Store("private room vanished".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// 応答者の接続と送信者の接続（オンラインなら）をルームの配信先に加える
    pub async fn attach_to_room(
        &self,
        responder: &crate::domain::ConnectionId,
        sender: &PlayerId,
        room: &Room,
    ) {
        self.pusher.subscribe(responder, &room.id).await;
        self.pusher.subscribe_identity(sender, &room.id).await;
    }

    /// 送信者がオンラインなら応答通知をターゲット送出
    pub async fn notify_sender(&self, sender: &PlayerId, json_message: &str) -> bool {
        self.pusher.push_to_identity(sender, json_message).await
    }
}
