//! UseCase 層のエラー定義
//!
//! サービス層の分類は NotFound / NotAuthorized / Conflict の 3 つ
//! （いずれも局所的・想定内・非致命）。ストア障害は Store として同じ型に
//! 畳み込み、ゲートウェイはどの種別でも「要求元ソケットへ汎用エラーを
//! 返して操作を破棄する」以上の区別をしません。

use thiserror::Error;

use crate::domain::{RepositoryError, ValueError};

/// ルーム・メッセージ・招待操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// ルームまたは招待が存在しない
    #[error("not found: {0}")]
    NotFound(String),
    /// 送信者が非 GLOBAL ルームの参加者でない
    #[error("not authorized: {0}")]
    NotAuthorized(String),
    /// pending 招待の重複、または終端状態の招待の再処理
    #[error("conflict: {0}")]
    Conflict(String),
    /// ストア側の障害
    #[error("store failure: {0}")]
    Store(String),
}

impl From<RepositoryError> for ChatError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::RoomNotFound(id) => ChatError::NotFound(format!("room {id}")),
            RepositoryError::InvitationNotFound(id) => {
                ChatError::NotFound(format!("invitation {id}"))
            }
            RepositoryError::DuplicateGlobalRoom => {
                ChatError::Conflict("global room already exists".to_string())
            }
            RepositoryError::DuplicatePrivateRoom { a, b } => {
                ChatError::Conflict(format!("private room already exists for ({a}, {b})"))
            }
            RepositoryError::DuplicatePendingInvitation { from, to } => {
                ChatError::Conflict(format!("pending invitation already exists from {from} to {to}"))
            }
            RepositoryError::InvitationNotPending(id) => {
                ChatError::Conflict(format!("invitation {id} is not pending"))
            }
            RepositoryError::StoreFailure(msg) => ChatError::Store(msg),
        }
    }
}

impl From<ValueError> for ChatError {
    fn from(err: ValueError) -> Self {
        ChatError::Store(err.to_string())
    }
}
