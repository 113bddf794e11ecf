//! エンティティ定義
//!
//! ルーム・メッセージ・招待のドメインモデル。認可判定（参加者ゲート）と
//! 招待の状態遷移はこの層のメソッドとして実装し、UseCase 層からは
//! これらを呼ぶだけにします。

use serde::Serialize;

use super::error::InvitationStateError;
use super::value_object::{
    BattleRef, InvitationId, MessageContent, MessageId, PlayerId, RoomId, RoomName, Timestamp,
};

/// ルームの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoomKind {
    /// 全プレイヤーが暗黙的に参加するルーム。システム全体で常にただ一つ。
    Global,
    /// 招待の成立で作られる 1:1 ルーム。参加者はちょうど 2 人。
    Private,
    /// プレイヤーが明示的に作る名前付きルーム。
    Party,
    /// 戦闘サブシステムが外部トリガで作る短命ルーム。
    Battle,
}

/// チャットルーム
///
/// GLOBAL のメンバーシップは全員暗黙なので `participants` は空のまま。
/// それ以外の種別は明示的な参加者集合を持ちます。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub kind: RoomKind,
    /// PARTY ルームのみ
    pub name: Option<RoomName>,
    /// BATTLE ルームのみ（戦闘サブシステム側の戦闘 ID）
    pub battle_ref: Option<BattleRef>,
    pub participants: Vec<PlayerId>,
    pub created_at: Timestamp,
}

impl Room {
    /// GLOBAL ルームを作成
    pub fn new_global(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            kind: RoomKind::Global,
            name: None,
            battle_ref: None,
            participants: Vec::new(),
            created_at,
        }
    }

    /// PRIVATE ルームを作成（参加者はちょうど 2 人）
    pub fn new_private(id: RoomId, a: PlayerId, b: PlayerId, created_at: Timestamp) -> Self {
        Self {
            id,
            kind: RoomKind::Private,
            name: None,
            battle_ref: None,
            participants: vec![a, b],
            created_at,
        }
    }

    /// PARTY ルームを作成
    ///
    /// 重複したメンバーは取り除かれます（先勝ち）。
    pub fn new_party(
        id: RoomId,
        name: RoomName,
        members: Vec<PlayerId>,
        created_at: Timestamp,
    ) -> Self {
        let mut participants: Vec<PlayerId> = Vec::new();
        for member in members {
            if !participants.contains(&member) {
                participants.push(member);
            }
        }
        Self {
            id,
            kind: RoomKind::Party,
            name: Some(name),
            battle_ref: None,
            participants,
            created_at,
        }
    }

    /// BATTLE ルームを作成（外部トリガ専用）
    pub fn new_battle(
        id: RoomId,
        battle_ref: BattleRef,
        a: PlayerId,
        b: PlayerId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            kind: RoomKind::Battle,
            name: None,
            battle_ref: Some(battle_ref),
            participants: vec![a, b],
            created_at,
        }
    }

    /// 参加者ゲート
    ///
    /// GLOBAL は誰でも投稿可。それ以外は参加者集合に含まれる送信者のみ。
    pub fn accepts_sender(&self, sender: &PlayerId) -> bool {
        match self.kind {
            RoomKind::Global => true,
            _ => self.participants.contains(sender),
        }
    }

    pub fn has_participant(&self, identity: &PlayerId) -> bool {
        self.participants.contains(identity)
    }

    /// 順序を無視した参加者ペア判定（PRIVATE ルームの再利用検索に使用）
    pub fn is_pair(&self, a: &PlayerId, b: &PlayerId) -> bool {
        self.participants.len() == 2
            && self.participants.contains(a)
            && self.participants.contains(b)
    }
}

/// チャットメッセージ
///
/// 作成後は不変。送信者名は書き込み時点の値を非正規化して保持します。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    pub from: PlayerId,
    pub sender_name: String,
    pub content: MessageContent,
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        room_id: RoomId,
        from: PlayerId,
        sender_name: String,
        content: MessageContent,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            room_id,
            from,
            sender_name,
            content,
            created_at,
        }
    }
}

/// 招待の状態
///
/// 状態遷移は `pending -> accepted` と `pending -> rejected` のみ。
/// accepted / rejected は終端で、そこからの遷移は常にエラーになります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

/// プライベートルームの招待
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub from: PlayerId,
    pub to: PlayerId,
    pub status: InvitationStatus,
    pub created_at: Timestamp,
}

impl Invitation {
    /// pending 状態の新しい招待を作成
    pub fn new(id: InvitationId, from: PlayerId, to: PlayerId, created_at: Timestamp) -> Self {
        Self {
            id,
            from,
            to,
            status: InvitationStatus::Pending,
            created_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    /// 招待を受諾（pending 以外からの遷移はエラー）
    pub fn accept(&mut self) -> Result<(), InvitationStateError> {
        if !self.is_pending() {
            return Err(InvitationStateError::NotPending(self.status));
        }
        self.status = InvitationStatus::Accepted;
        Ok(())
    }

    /// 招待を拒否（pending 以外からの遷移はエラー）
    pub fn reject(&mut self) -> Result<(), InvitationStateError> {
        if !self.is_pending() {
            return Err(InvitationStateError::NotPending(self.status));
        }
        self.status = InvitationStatus::Rejected;
        Ok(())
    }
}
