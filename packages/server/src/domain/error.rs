//! ドメイン層のエラー定義

use thiserror::Error;

use super::entity::InvitationStatus;

/// 値オブジェクトのバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{field} is too long ({actual} > {max})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// 招待の状態遷移エラー
///
/// 終端状態（accepted / rejected）からの遷移試行で返されます。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvitationStateError {
    #[error("invitation is not pending (status: {0:?})")]
    NotPending(InvitationStatus),
}

/// Repository（メッセージストア）のエラー
///
/// 一意制約違反（GLOBAL ルーム、参加者ペア、pending 招待）はストア側で
/// 検出します。アプリケーション層の check-then-act だけでは競合を防げない
/// ため、一意性の保証は永続層に置きます。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room not found: {0}")]
    RoomNotFound(String),
    #[error("invitation not found: {0}")]
    InvitationNotFound(String),
    #[error("a global room already exists")]
    DuplicateGlobalRoom,
    #[error("a private room already exists for pair ({a}, {b})")]
    DuplicatePrivateRoom { a: String, b: String },
    #[error("a pending invitation already exists from '{from}' to '{to}'")]
    DuplicatePendingInvitation { from: String, to: String },
    #[error("invitation '{0}' is not pending")]
    InvitationNotPending(String),
    #[error("store failure: {0}")]
    StoreFailure(String),
}

/// EventPusher（ソケットへのイベント送出）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventPushError {
    #[error("connection not found: {0}")]
    ConnectionNotFound(String),
    #[error("failed to push event: {0}")]
    PushFailed(String),
}
