//! Local projection of rooms, messages and invitations.
//!
//! This module contains the reconciliation hook: a pure reducer over
//! server-pushed events with no I/O, making it easy to test. The server
//! guarantees that push events carry enough data to reconcile without
//! another round-trip; anything missed while offline is repaired by the
//! pull-style replies (`invitations-list`, `user-rooms`).

use std::collections::{BTreeMap, HashMap};

use hiroba_server::infrastructure::dto::websocket::{
    InvitationDto, MessageDto, RoomDto, ServerEvent,
};

/// Client-side view of the chat state
#[derive(Debug, Default)]
pub struct ChatProjection {
    /// Known rooms keyed by room id
    rooms: BTreeMap<String, RoomDto>,
    /// Per-room message lists, chronological, deduplicated by message id
    messages: HashMap<String, Vec<MessageDto>>,
    /// Pending invitations keyed by invitation id
    invitations: BTreeMap<String, InvitationDto>,
    /// The room the user last joined
    active_room: Option<String>,
}

impl ChatProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one server event into the projection.
    pub fn apply(&mut self, event: &ServerEvent) {
        match event {
            ServerEvent::JoinedGlobal { room, messages }
            | ServerEvent::JoinedRoom { room, messages } => {
                self.upsert_room(room);
                self.active_room = Some(room.id.clone());
                for message in messages {
                    self.insert_message(message);
                }
            }
            ServerEvent::NewMessage { message } => {
                self.insert_message(message);
            }
            ServerEvent::MessagesHistory { messages, .. } => {
                for message in messages {
                    self.insert_message(message);
                }
            }
            ServerEvent::InvitationSent { invitation }
            | ServerEvent::InvitationReceived { invitation } => {
                self.invitations
                    .insert(invitation.id.clone(), invitation.clone());
            }
            ServerEvent::InvitationAccepted { invitation, room } => {
                self.invitations.remove(&invitation.id);
                self.upsert_room(room);
            }
            ServerEvent::InvitationRejected { invitation } => {
                self.invitations.remove(&invitation.id);
            }
            ServerEvent::InvitationsList { invitations } => {
                // The pull reply is the server's truth: replace, don't merge
                self.invitations = invitations
                    .iter()
                    .map(|i| (i.id.clone(), i.clone()))
                    .collect();
            }
            ServerEvent::UserRooms { rooms } => {
                for preview in rooms {
                    self.upsert_room(&preview.room);
                    if let Some(message) = &preview.last_message {
                        self.insert_message(message);
                    }
                }
            }
            ServerEvent::BattleRoomCreated { room, .. }
            | ServerEvent::PartyCreated { room } => {
                self.upsert_room(room);
            }
            ServerEvent::Error { .. } => {
                // Display-only; the projection stays untouched
            }
        }
    }

    fn upsert_room(&mut self, room: &RoomDto) {
        self.rooms.insert(room.id.clone(), room.clone());
        self.messages.entry(room.id.clone()).or_default();
    }

    fn insert_message(&mut self, message: &MessageDto) {
        let log = self.messages.entry(message.room_id.clone()).or_default();
        if log.iter().any(|m| m.id == message.id) {
            return;
        }
        log.push(message.clone());
        // Pushes can interleave with history pages; keep chronological order
        log.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    pub fn active_room(&self) -> Option<&str> {
        self.active_room.as_deref()
    }

    pub fn rooms(&self) -> Vec<&RoomDto> {
        self.rooms.values().collect()
    }

    pub fn room(&self, room_id: &str) -> Option<&RoomDto> {
        self.rooms.get(room_id)
    }

    pub fn messages_in(&self, room_id: &str) -> &[MessageDto] {
        self.messages.get(room_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pending_invitations(&self) -> Vec<&InvitationDto> {
        self.invitations.values().collect()
    }
}
