//! Repository trait 定義
//!
//! ドメイン層が必要とするメッセージストア（ルーム・メッセージ・招待の
//! 永続化）へのインターフェース。具体的な実装は Infrastructure 層が
//! 提供します（依存性の逆転）。
//!
//! ## 一意性の保証について
//!
//! 「GLOBAL ルームは 1 つ」「PRIVATE ルームは参加者ペアごとに 1 つ」
//! 「pending 招待は (送信者, 受信者) ごとに 1 つ」の 3 つの一意制約は
//! ストア実装側が検査し、違反時は対応する `RepositoryError` を返します。
//! UseCase 層の find-then-create は競合し得るため、最終防衛線はここです。

use async_trait::async_trait;

use super::entity::{ChatMessage, Invitation, InvitationStatus, Room};
use super::error::RepositoryError;
use super::value_object::{InvitationId, PlayerId, RoomId};

/// メッセージストアへのインターフェース
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// ルームを作成（種別ごとの一意制約はストア側で検査）
    async fn create_room(&self, room: Room) -> Result<Room, RepositoryError>;

    /// ID でルームを取得
    async fn find_room(&self, id: &RoomId) -> Option<Room>;

    /// GLOBAL ルームを取得
    async fn find_global_room(&self) -> Option<Room>;

    /// 参加者ペア（順序不問）の PRIVATE ルームを取得
    async fn find_private_room_for_pair(&self, a: &PlayerId, b: &PlayerId) -> Option<Room>;

    /// identity が参加者に含まれる全ルームを取得
    async fn list_rooms_for(&self, identity: &PlayerId) -> Vec<Room>;

    /// 全ルームを取得（運用 API 向け）
    async fn list_rooms(&self) -> Vec<Room>;

    /// メッセージを追記（ルームが存在しなければ RoomNotFound）
    async fn append_message(&self, message: ChatMessage) -> Result<ChatMessage, RepositoryError>;

    /// メッセージを新しい順に limit 件取得（offset は新しい側からのスキップ数）
    async fn list_messages(
        &self,
        room_id: &RoomId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// ルームの最新メッセージを取得（プレビュー用）
    async fn latest_message(&self, room_id: &RoomId) -> Option<ChatMessage>;

    /// 招待を作成（pending の重複はストア側で検査）
    async fn create_invitation(
        &self,
        invitation: Invitation,
    ) -> Result<Invitation, RepositoryError>;

    /// ID で招待を取得
    async fn find_invitation(&self, id: &InvitationId) -> Option<Invitation>;

    /// (送信者, 受信者) の pending 招待を取得
    async fn find_pending_invitation(
        &self,
        from: &PlayerId,
        to: &PlayerId,
    ) -> Option<Invitation>;

    /// identity が受信者である pending 招待を全て取得
    async fn list_pending_invitations_for(&self, receiver: &PlayerId) -> Vec<Invitation>;

    /// 招待の状態を更新（pending 以外からの遷移は InvitationNotPending）
    async fn update_invitation_status(
        &self,
        id: &InvitationId,
        status: InvitationStatus,
    ) -> Result<Invitation, RepositoryError>;
}
