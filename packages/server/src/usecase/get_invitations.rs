//! UseCase: 招待一覧取得処理
//!
//! identity が受信者である pending 招待のプル取得。オフライン中に
//! 取りこぼした招待通知はここで回収されます。

use std::sync::Arc;

use crate::domain::{ChatStore, Invitation, PlayerId};

/// 招待一覧取得のユースケース
pub struct GetInvitationsUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
}

impl GetInvitationsUseCase {
    /// 新しい GetInvitationsUseCase を作成
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    /// identity 宛の pending 招待を取得
    pub async fn execute(&self, identity: &PlayerId) -> Vec<Invitation> {
        self.store.list_pending_invitations_for(identity).await
    }
}
