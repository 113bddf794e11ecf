//! WebSocket イベント DTO 定義
//!
//! チャットチャンネル上を流れる名前付きイベント。`type` フィールドを
//! タグとする JSON で、イベント名は kebab-case。クライアント側の
//! ローカル射影（rooms / messages / invitations）はこれらのイベント
//! だけで再構成できるよう、push 系イベントには必要なデータを全て
//! 載せます。

use serde::{Deserialize, Serialize};

/// クライアント → サーバーのイベント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// GLOBAL ルームへ参加（identity の束縛を兼ねる）
    JoinGlobal { identity: String },
    /// 指定ルームへ参加（identity の束縛を兼ねる）
    JoinRoom { identity: String, room_id: String },
    /// ルームの配信先から抜ける（応答なし）
    LeaveRoom { room_id: String },
    /// メッセージ送信（room_id 省略時は GLOBAL）
    SendMessage {
        identity: String,
        content: String,
        #[serde(default)]
        room_id: Option<String>,
    },
    /// 履歴のページ取得
    GetMessages {
        room_id: String,
        #[serde(default)]
        limit: Option<usize>,
        #[serde(default)]
        offset: Option<usize>,
    },
    /// プライベートルームへの招待
    Invite {
        sender_identity: String,
        receiver_identity: String,
    },
    /// 招待への応答
    RespondInvitation {
        identity: String,
        invitation_id: String,
        accept: bool,
    },
    /// 自分宛の pending 招待一覧
    GetInvitations { identity: String },
    /// 自分のルーム一覧（プレビュー付き）
    GetUserRooms { identity: String },
    /// パーティルームの作成
    CreateParty {
        identity: String,
        name: String,
        #[serde(default)]
        members: Vec<String>,
    },
}

/// サーバー → クライアントのイベント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// join-global への応答（要求元ソケットのみ）
    JoinedGlobal {
        room: RoomDto,
        messages: Vec<MessageDto>,
    },
    /// join-room への応答（要求元ソケットのみ）
    JoinedRoom {
        room: RoomDto,
        messages: Vec<MessageDto>,
    },
    /// ルームの全購読接続へのブロードキャスト
    NewMessage { message: MessageDto },
    /// get-messages への応答（要求元ソケットのみ）
    MessagesHistory {
        room_id: String,
        messages: Vec<MessageDto>,
    },
    /// invite への応答（送信者のみ）
    InvitationSent { invitation: InvitationDto },
    /// 受信者へのターゲット通知（オンライン時のみ、fire-and-forget）
    InvitationReceived { invitation: InvitationDto },
    /// 受諾の通知（応答者と、オンラインなら送信者にも）
    InvitationAccepted {
        invitation: InvitationDto,
        room: RoomDto,
    },
    /// 拒否の通知（応答者のみ）
    InvitationRejected { invitation: InvitationDto },
    /// get-invitations への応答
    InvitationsList { invitations: Vec<InvitationDto> },
    /// get-user-rooms への応答
    UserRooms { rooms: Vec<RoomPreviewDto> },
    /// 戦闘サブシステムのトリガによる通知（オンラインの参加者のみ）
    BattleRoomCreated { room: RoomDto, battle_ref: String },
    /// create-party への応答（作成者と、オンラインのメンバーにも）
    PartyCreated { room: RoomDto },
    /// 汎用エラー（要求元ソケットのみ）
    Error { message: String },
}

/// ルームのワイヤ表現
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: String,
    /// "global" | "private" | "party" | "battle"
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub battle_ref: Option<String>,
    pub participants: Vec<String>,
    pub created_at: i64,
}

/// メッセージのワイヤ表現
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub room_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub created_at: i64,
}

/// 招待のワイヤ表現
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationDto {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    /// "pending" | "accepted" | "rejected"
    pub status: String,
    pub created_at: i64,
}

/// プレビュー付きルームのワイヤ表現
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPreviewDto {
    pub room: RoomDto,
    #[serde(default)]
    pub last_message: Option<MessageDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_tags_are_kebab_case() {
        // テスト項目: クライアントイベントの type タグが kebab-case になる
        // given (前提条件):
        let event = ClientEvent::JoinGlobal {
            identity: "12".to_string(),
        };

        // when (操作):
        let json = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "join-global");
        assert_eq!(json["identity"], "12");
    }

    #[test]
    fn test_send_message_room_id_is_optional() {
        // テスト項目: send-message の room_id が省略可能
        // given (前提条件):
        let json = r#"{"type":"send-message","identity":"12","content":"hello"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::SendMessage {
                identity: "12".to_string(),
                content: "hello".to_string(),
                room_id: None,
            }
        );
    }

    #[test]
    fn test_respond_invitation_round_trip() {
        // テスト項目: respond-invitation がシリアライズ往復で保存される
        // given (前提条件):
        let event = ClientEvent::RespondInvitation {
            identity: "2".to_string(),
            invitation_id: "inv-1".to_string(),
            accept: true,
        };

        // when (操作):
        let json = serde_json::to_string(&event).unwrap();
        let parsed: ClientEvent = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_server_error_event_shape() {
        // テスト項目: エラーイベントが {type, message} の形になる
        // given (前提条件):
        let event = ServerEvent::Error {
            message: "conflict: pending invitation already exists".to_string(),
        };

        // when (操作):
        let json = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "error");
        assert!(json["message"].as_str().unwrap().contains("conflict"));
    }

    #[test]
    fn test_unknown_event_type_fails_to_parse() {
        // テスト項目: 未知のイベント型がパースエラーになる
        // given (前提条件):
        let json = r#"{"type":"fly-to-the-moon"}"#;

        // when (操作):
        let result: Result<ClientEvent, _> = serde_json::from_str(json);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
