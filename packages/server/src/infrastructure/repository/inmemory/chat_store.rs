//! InMemory ChatStore 実装
//!
//! ドメイン層が定義する ChatStore trait の具体的な実装。HashMap を
//! インメモリ DB として使用します。
//!
//! ## 一意制約
//!
//! DBMS 実装なら一意インデックスに載せる 3 つの制約をここで検査します：
//!
//! - kind = GLOBAL のルームは 1 つ
//! - PRIVATE ルームは参加者ペア（順序不問）ごとに 1 つ
//! - pending 招待は (送信者, 受信者) の順序付きペアごとに 1 つ
//!
//! UseCase 層の find-then-create は同時実行で競合し得るため、敗けた側は
//! ここが返す Duplicate 系エラーを合図に再検索します。
//!
//! ## 技術的負債
//!
//! ドメインモデルをそのままストレージとして保持しています。InMemory
//! 実装では許容される妥協ですが、PostgreSQL などを実装する際は
//! Row → DTO → ドメインモデルの変換層が必要になります。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ChatStore, Invitation, InvitationId, InvitationStatus, PlayerId,
    RepositoryError, Room, RoomId, RoomKind,
};

#[derive(Default)]
struct StoreInner {
    rooms: HashMap<RoomId, Room>,
    /// ルームごとのメッセージログ（挿入順 = 時系列順）
    messages: HashMap<RoomId, Vec<ChatMessage>>,
    invitations: HashMap<InvitationId, Invitation>,
}

/// インメモリ ChatStore 実装
pub struct InMemoryChatStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryChatStore {
    /// 新しい InMemoryChatStore を作成
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
        }
    }
}

impl Default for InMemoryChatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn create_room(&self, room: Room) -> Result<Room, RepositoryError> {
        let mut inner = self.inner.lock().await;

        // 一意制約の検査
        match room.kind {
            RoomKind::Global => {
                if inner.rooms.values().any(|r| r.kind == RoomKind::Global) {
                    return Err(RepositoryError::DuplicateGlobalRoom);
                }
            }
            RoomKind::Private => {
                let a = &room.participants[0];
                let b = &room.participants[1];
                if inner
                    .rooms
                    .values()
                    .any(|r| r.kind == RoomKind::Private && r.is_pair(a, b))
                {
                    return Err(RepositoryError::DuplicatePrivateRoom {
                        a: a.as_str().to_string(),
                        b: b.as_str().to_string(),
                    });
                }
            }
            RoomKind::Party | RoomKind::Battle => {}
        }

        inner.messages.insert(room.id.clone(), Vec::new());
        inner.rooms.insert(room.id.clone(), room.clone());
        Ok(room)
    }

    async fn find_room(&self, id: &RoomId) -> Option<Room> {
        let inner = self.inner.lock().await;
        inner.rooms.get(id).cloned()
    }

    async fn find_global_room(&self) -> Option<Room> {
        let inner = self.inner.lock().await;
        inner
            .rooms
            .values()
            .find(|r| r.kind == RoomKind::Global)
            .cloned()
    }

    async fn find_private_room_for_pair(&self, a: &PlayerId, b: &PlayerId) -> Option<Room> {
        let inner = self.inner.lock().await;
        inner
            .rooms
            .values()
            .find(|r| r.kind == RoomKind::Private && r.is_pair(a, b))
            .cloned()
    }

    async fn list_rooms_for(&self, identity: &PlayerId) -> Vec<Room> {
        let inner = self.inner.lock().await;
        let mut rooms: Vec<Room> = inner
            .rooms
            .values()
            .filter(|r| r.has_participant(identity))
            .cloned()
            .collect();
        // HashMap の走査順に依存しないよう作成時刻で安定化
        rooms.sort_by_key(|r| (r.created_at, r.id.as_str().to_string()));
        rooms
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let inner = self.inner.lock().await;
        let mut rooms: Vec<Room> = inner.rooms.values().cloned().collect();
        rooms.sort_by_key(|r| (r.created_at, r.id.as_str().to_string()));
        rooms
    }

    async fn append_message(&self, message: ChatMessage) -> Result<ChatMessage, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let log = inner
            .messages
            .get_mut(&message.room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(message.room_id.as_str().to_string()))?;
        log.push(message.clone());
        Ok(message)
    }

    async fn list_messages(
        &self,
        room_id: &RoomId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let inner = self.inner.lock().await;
        let log = inner
            .messages
            .get(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))?;
        // 新しい順に offset 件飛ばして limit 件
        Ok(log.iter().rev().skip(offset).take(limit).cloned().collect())
    }

    async fn latest_message(&self, room_id: &RoomId) -> Option<ChatMessage> {
        let inner = self.inner.lock().await;
        inner.messages.get(room_id).and_then(|log| log.last().cloned())
    }

    async fn create_invitation(
        &self,
        invitation: Invitation,
    ) -> Result<Invitation, RepositoryError> {
        let mut inner = self.inner.lock().await;

        // 順序付きペアの single-pending 制約
        if inner.invitations.values().any(|i| {
            i.is_pending() && i.from == invitation.from && i.to == invitation.to
        }) {
            return Err(RepositoryError::DuplicatePendingInvitation {
                from: invitation.from.as_str().to_string(),
                to: invitation.to.as_str().to_string(),
            });
        }

        inner
            .invitations
            .insert(invitation.id.clone(), invitation.clone());
        Ok(invitation)
    }

    async fn find_invitation(&self, id: &InvitationId) -> Option<Invitation> {
        let inner = self.inner.lock().await;
        inner.invitations.get(id).cloned()
    }

    async fn find_pending_invitation(
        &self,
        from: &PlayerId,
        to: &PlayerId,
    ) -> Option<Invitation> {
        let inner = self.inner.lock().await;
        inner
            .invitations
            .values()
            .find(|i| i.is_pending() && &i.from == from && &i.to == to)
            .cloned()
    }

    async fn list_pending_invitations_for(&self, receiver: &PlayerId) -> Vec<Invitation> {
        let inner = self.inner.lock().await;
        let mut invitations: Vec<Invitation> = inner
            .invitations
            .values()
            .filter(|i| i.is_pending() && &i.to == receiver)
            .cloned()
            .collect();
        invitations.sort_by_key(|i| (i.created_at, i.id.as_str().to_string()));
        invitations
    }

    async fn update_invitation_status(
        &self,
        id: &InvitationId,
        status: InvitationStatus,
    ) -> Result<Invitation, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let invitation = inner
            .invitations
            .get_mut(id)
            .ok_or_else(|| RepositoryError::InvitationNotFound(id.as_str().to_string()))?;

        let transition = match status {
            InvitationStatus::Accepted => invitation.accept(),
            InvitationStatus::Rejected => invitation.reject(),
            InvitationStatus::Pending => {
                return Err(RepositoryError::StoreFailure(
                    "cannot transition back to pending".to_string(),
                ));
            }
        };
        transition.map_err(|_| RepositoryError::InvitationNotPending(id.as_str().to_string()))?;

        Ok(invitation.clone())
    }
}
