//! Slash-command parsing for the interactive client.
//!
//! Pure functions from input lines to commands to wire events, kept free of
//! I/O so they can be tested directly.

use hiroba_server::infrastructure::dto::websocket::ClientEvent;

use crate::error::ClientError;

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: send to the active room
    Say(String),
    /// /join <room_id>
    Join(String),
    /// /leave (leaves the active room)
    Leave,
    /// /history [limit] [offset]
    History {
        limit: Option<usize>,
        offset: Option<usize>,
    },
    /// /invite <identity>
    Invite(String),
    /// /accept <invitation_id>
    Accept(String),
    /// /reject <invitation_id>
    Reject(String),
    /// /invites (lists pending invitations)
    Invites,
    /// /rooms (lists my rooms)
    Rooms,
    /// /party <name> [member ...]
    Party { name: String, members: Vec<String> },
    /// /help (handled locally)
    Help,
    /// /quit (handled locally)
    Quit,
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Command, ClientError> {
        let line = line.trim();
        if !line.starts_with('/') {
            return Ok(Command::Say(line.to_string()));
        }

        let mut parts = line.split_whitespace();
        let head = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match head {
            "/join" => match args.as_slice() {
                [room_id] => Ok(Command::Join(room_id.to_string())),
                _ => Err(ClientError::InvalidCommand(
                    "usage: /join <room_id>".to_string(),
                )),
            },
            "/leave" => Ok(Command::Leave),
            "/history" => {
                let limit = args
                    .first()
                    .map(|v| v.parse())
                    .transpose()
                    .map_err(|_| ClientError::InvalidCommand("usage: /history [limit] [offset]".to_string()))?;
                let offset = args
                    .get(1)
                    .map(|v| v.parse())
                    .transpose()
                    .map_err(|_| ClientError::InvalidCommand("usage: /history [limit] [offset]".to_string()))?;
                Ok(Command::History { limit, offset })
            }
            "/invite" => match args.as_slice() {
                [identity] => Ok(Command::Invite(identity.to_string())),
                _ => Err(ClientError::InvalidCommand(
                    "usage: /invite <identity>".to_string(),
                )),
            },
            "/accept" => match args.as_slice() {
                [id] => Ok(Command::Accept(id.to_string())),
                _ => Err(ClientError::InvalidCommand(
                    "usage: /accept <invitation_id>".to_string(),
                )),
            },
            "/reject" => match args.as_slice() {
                [id] => Ok(Command::Reject(id.to_string())),
                _ => Err(ClientError::InvalidCommand(
                    "usage: /reject <invitation_id>".to_string(),
                )),
            },
            "/invites" => Ok(Command::Invites),
            "/rooms" => Ok(Command::Rooms),
            "/party" => match args.as_slice() {
                [] => Err(ClientError::InvalidCommand(
                    "usage: /party <name> [member ...]".to_string(),
                )),
                [name, members @ ..] => Ok(Command::Party {
                    name: name.to_string(),
                    members: members.iter().map(|m| m.to_string()).collect(),
                }),
            },
            "/help" => Ok(Command::Help),
            "/quit" => Ok(Command::Quit),
            other => Err(ClientError::InvalidCommand(format!(
                "unknown command: {other}"
            ))),
        }
    }

    /// Convert a network command into its wire event.
    ///
    /// `Help` and `Quit` are local commands; the session handles them before
    /// calling this.
    pub fn into_event(
        self,
        identity: &str,
        active_room: Option<&str>,
    ) -> Result<ClientEvent, ClientError> {
        match self {
            Command::Say(content) => Ok(ClientEvent::SendMessage {
                identity: identity.to_string(),
                content,
                // None targets the global room
                room_id: active_room.map(|r| r.to_string()),
            }),
            Command::Join(room_id) => Ok(ClientEvent::JoinRoom {
                identity: identity.to_string(),
                room_id,
            }),
            Command::Leave => {
                let room_id = active_room.ok_or(ClientError::NoActiveRoom)?;
                Ok(ClientEvent::LeaveRoom {
                    room_id: room_id.to_string(),
                })
            }
            Command::History { limit, offset } => {
                let room_id = active_room.ok_or(ClientError::NoActiveRoom)?;
                Ok(ClientEvent::GetMessages {
                    room_id: room_id.to_string(),
                    limit,
                    offset,
                })
            }
            Command::Invite(receiver) => Ok(ClientEvent::Invite {
                sender_identity: identity.to_string(),
                receiver_identity: receiver,
            }),
            Command::Accept(invitation_id) => Ok(ClientEvent::RespondInvitation {
                identity: identity.to_string(),
                invitation_id,
                accept: true,
            }),
            Command::Reject(invitation_id) => Ok(ClientEvent::RespondInvitation {
                identity: identity.to_string(),
                invitation_id,
                accept: false,
            }),
            Command::Invites => Ok(ClientEvent::GetInvitations {
                identity: identity.to_string(),
            }),
            Command::Rooms => Ok(ClientEvent::GetUserRooms {
                identity: identity.to_string(),
            }),
            Command::Party { name, members } => Ok(ClientEvent::CreateParty {
                identity: identity.to_string(),
                name,
                members,
            }),
            Command::Help | Command::Quit => Err(ClientError::InvalidCommand(
                "local command has no wire event".to_string(),
            )),
        }
    }
}

/// Help text for /help
pub const HELP_TEXT: &str = "\
Commands:
  <text>                  send a message to the active room
  /join <room_id>         join a room and load its history
  /leave                  leave the active room
  /history [limit] [off]  page backward through the active room
  /invite <identity>      invite a player to a private chat
  /accept <invitation_id> accept an invitation
  /reject <invitation_id> reject an invitation
  /invites                list pending invitations
  /rooms                  list my rooms
  /party <name> [m ...]   create a party room
  /help                   show this help
  /quit                   exit
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_becomes_say() {
        // テスト項目: スラッシュで始まらない行が Say になる
        // given (前提条件):
        let line = "hello there";

        // when (操作):
        let command = Command::parse(line).unwrap();

        // then (期待する結果):
        assert_eq!(command, Command::Say("hello there".to_string()));
    }

    #[test]
    fn test_invite_requires_exactly_one_argument() {
        // テスト項目: /invite の引数が 1 つでないとエラーになる
        // given (前提条件):

        // when (操作):
        let ok = Command::parse("/invite bob");
        let missing = Command::parse("/invite");
        let extra = Command::parse("/invite bob charlie");

        // then (期待する結果):
        assert_eq!(ok.unwrap(), Command::Invite("bob".to_string()));
        assert!(missing.is_err());
        assert!(extra.is_err());
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        // テスト項目: 未知のコマンドが InvalidCommand になる
        // given (前提条件):

        // when (操作):
        let result = Command::parse("/teleport home");

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidCommand(_))));
    }

    #[test]
    fn test_say_targets_active_room() {
        // テスト項目: Say がアクティブルームを宛先にした send-message になる
        // given (前提条件):
        let command = Command::Say("hi".to_string());

        // when (操作):
        let event = command.into_event("12", Some("room-1")).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::SendMessage {
                identity: "12".to_string(),
                content: "hi".to_string(),
                room_id: Some("room-1".to_string()),
            }
        );
    }

    #[test]
    fn test_say_without_active_room_falls_back_to_global() {
        // テスト項目: アクティブルームが無い Say は room_id 無し（= GLOBAL 宛）になる
        // given (前提条件):
        let command = Command::Say("hi".to_string());

        // when (操作):
        let event = command.into_event("12", None).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::SendMessage {
                identity: "12".to_string(),
                content: "hi".to_string(),
                room_id: None,
            }
        );
    }

    #[test]
    fn test_leave_requires_active_room() {
        // テスト項目: アクティブルームの無い /leave が NoActiveRoom になる
        // given (前提条件):
        let command = Command::Leave;

        // when (操作):
        let result = command.into_event("12", None);

        // then (期待する結果):
        assert_eq!(result, Err(ClientError::NoActiveRoom));
    }

    #[test]
    fn test_history_parses_limit_and_offset() {
        // テスト項目: /history の limit / offset が数値として解釈される
        // given (前提条件):

        // when (操作):
        let command = Command::parse("/history 20 40").unwrap();
        let event = command.into_event("12", Some("room-1")).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::GetMessages {
                room_id: "room-1".to_string(),
                limit: Some(20),
                offset: Some(40),
            }
        );
    }

    #[test]
    fn test_party_collects_members() {
        // テスト項目: /party が名前とメンバーリストに分かれる
        // given (前提条件):

        // when (操作):
        let command = Command::parse("/party raiders bob charlie").unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            Command::Party {
                name: "raiders".to_string(),
                members: vec!["bob".to_string(), "charlie".to_string()],
            }
        );
    }

    #[test]
    fn test_accept_builds_respond_invitation_event() {
        // テスト項目: /accept が accept=true の respond-invitation になる
        // given (前提条件):
        let command = Command::parse("/accept inv-1").unwrap();

        // when (操作):
        let event = command.into_event("2", None).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::RespondInvitation {
                identity: "2".to_string(),
                invitation_id: "inv-1".to_string(),
                accept: true,
            }
        );
    }
}
