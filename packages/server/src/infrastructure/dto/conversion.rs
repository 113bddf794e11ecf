//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatMessage, Invitation, InvitationStatus, Room, RoomKind};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<RoomKind> for String {
    fn from(kind: RoomKind) -> Self {
        match kind {
            RoomKind::Global => "global",
            RoomKind::Private => "private",
            RoomKind::Party => "party",
            RoomKind::Battle => "battle",
        }
        .to_string()
    }
}

impl From<Room> for dto::RoomDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.into_string(),
            kind: room.kind.into(),
            name: room.name.map(|n| n.as_str().to_string()),
            battle_ref: room.battle_ref.map(|r| r.as_str().to_string()),
            participants: room
                .participants
                .into_iter()
                .map(|p| p.into_string())
                .collect(),
            created_at: room.created_at.value(),
        }
    }
}

impl From<ChatMessage> for dto::MessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id.into_string(),
            room_id: message.room_id.into_string(),
            sender_id: message.from.into_string(),
            sender_name: message.sender_name,
            content: message.content.into_string(),
            created_at: message.created_at.value(),
        }
    }
}

impl From<InvitationStatus> for String {
    fn from(status: InvitationStatus) -> Self {
        match status {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Rejected => "rejected",
        }
        .to_string()
    }
}

impl From<Invitation> for dto::InvitationDto {
    fn from(invitation: Invitation) -> Self {
        Self {
            id: invitation.id.into_string(),
            sender_id: invitation.from.into_string(),
            receiver_id: invitation.to.into_string(),
            status: invitation.status.into(),
            created_at: invitation.created_at.value(),
        }
    }
}

impl From<crate::domain::ValueError> for dto::ServerEvent {
    fn from(err: crate::domain::ValueError) -> Self {
        dto::ServerEvent::Error {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BattleRef, InvitationIdFactory, MessageContent, MessageIdFactory, PlayerId,
        RoomIdFactory, Timestamp,
    };

    fn player(id: &str) -> PlayerId {
        PlayerId::new(id.to_string()).unwrap()
    }

    #[test]
    fn test_battle_room_to_dto() {
        // テスト項目: バトルルームが kind と battle_ref 付きで DTO になる
        // given (前提条件):
        let room = Room::new_battle(
            RoomIdFactory::generate().unwrap(),
            BattleRef::new("battle-42".to_string()).unwrap(),
            player("5"),
            player("9"),
            Timestamp::new(2000),
        );

        // when (操作):
        let dto: dto::RoomDto = room.into();

        // then (期待する結果):
        assert_eq!(dto.kind, "battle");
        assert_eq!(dto.battle_ref.as_deref(), Some("battle-42"));
        assert_eq!(dto.participants, vec!["5".to_string(), "9".to_string()]);
        assert_eq!(dto.created_at, 2000);
    }

    #[test]
    fn test_chat_message_to_dto() {
        // テスト項目: メッセージが送信者情報付きで DTO になる
        // given (前提条件):
        let room_id = RoomIdFactory::generate().unwrap();
        let message = ChatMessage::new(
            MessageIdFactory::generate().unwrap(),
            room_id.clone(),
            player("12"),
            "Aria".to_string(),
            MessageContent::new("hello".to_string()).unwrap(),
            Timestamp::new(3000),
        );

        // when (操作):
        let dto: dto::MessageDto = message.into();

        // then (期待する結果):
        assert_eq!(dto.room_id, room_id.as_str());
        assert_eq!(dto.sender_id, "12");
        assert_eq!(dto.sender_name, "Aria");
        assert_eq!(dto.content, "hello");
    }

    #[test]
    fn test_invitation_to_dto_carries_status() {
        // テスト項目: 招待の状態が文字列として DTO に写る
        // given (前提条件):
        let mut invitation = Invitation::new(
            InvitationIdFactory::generate().unwrap(),
            player("1"),
            player("2"),
            Timestamp::new(4000),
        );
        invitation.accept().unwrap();

        // when (操作):
        let dto: dto::InvitationDto = invitation.into();

        // then (期待する結果):
        assert_eq!(dto.sender_id, "1");
        assert_eq!(dto.receiver_id, "2");
        assert_eq!(dto.status, "accepted");
    }
}
