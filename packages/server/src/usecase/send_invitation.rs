//! UseCase: 招待送信処理
//!
//! (送信者, 受信者) の順序付きペアごとに pending 招待はたかだか 1 つ。
//! 受信者がオンラインなら通知をターゲット送出しますが、オフラインなら
//! 何も積みません（fire-and-forget）。受信者は get-invitations での
//! プル取得で取りこぼしを回収します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendInvitationUseCase::execute() メソッド
//! - pending 招待の single-pending 不変条件と解決後の再送可否
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規の招待
//! - 異常系：pending が残ったままの再送、自分自身への招待

use std::sync::Arc;

use crate::domain::{
    ChatStore, EventPusher, Invitation, InvitationIdFactory, PlayerId, Timestamp,
};

use super::error::ChatError;

/// 招待送信のユースケース
pub struct SendInvitationUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
    /// EventPusher（接続管理とイベント送出の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl SendInvitationUseCase {
    /// 新しい SendInvitationUseCase を作成
    pub fn new(store: Arc<dyn ChatStore>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { store, pusher }
    }

    /// 招待送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 招待を送るプレイヤー identity
    /// * `receiver` - 招待されるプレイヤー identity
    pub async fn execute(
        &self,
        sender: PlayerId,
        receiver: PlayerId,
    ) -> Result<Invitation, ChatError> {
        use hiroba_shared::time::jst_now_millis;

        // 1. 自分自身への招待は成立し得ない（PRIVATE ルームは参加者 2 人）
        if sender == receiver {
            return Err(ChatError::Conflict(
                "cannot invite yourself".to_string(),
            ));
        }

        // 2. 既存の pending を確認（最終防衛線はストア側の一意制約）
        if self
            .store
            .find_pending_invitation(&sender, &receiver)
            .await
            .is_some()
        {
            return Err(ChatError::Conflict(format!(
                "pending invitation already exists from {} to {}",
                sender.as_str(),
                receiver.as_str()
            )));
        }

        // 3. pending 状態で作成
        let invitation = Invitation::new(
            InvitationIdFactory::generate()?,
            sender,
            receiver,
            Timestamp::new(jst_now_millis()),
        );
        let invitation = self.store.create_invitation(invitation).await?;

        Ok(invitation)
    }

    /// 受信者がオンラインなら招待通知をターゲット送出
    ///
    /// # Returns
    ///
    /// 配送できたら true（オフラインなら false、キューはしない）
    pub async fn notify_receiver(&self, receiver: &PlayerId, json_message: &str) -> bool {
        self.pusher.push_to_identity(receiver, json_message).await
    }
}
