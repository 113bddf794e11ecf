//! Message formatting utilities for client display.

use hiroba_server::infrastructure::dto::websocket::{
    InvitationDto, MessageDto, RoomDto, RoomPreviewDto,
};
use hiroba_shared::time::format_jst_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the snapshot received after joining a room
    pub fn format_joined(room: &RoomDto, messages: &[MessageDto]) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str(&format!("Joined {} room {}\n", room.kind, room.id));
        if let Some(name) = &room.name {
            output.push_str(&format!("Name: {}\n", name));
        }
        if !room.participants.is_empty() {
            output.push_str(&format!("Participants: {}\n", room.participants.join(", ")));
        }
        if messages.is_empty() {
            output.push_str("(No messages yet)\n");
        } else {
            for message in messages {
                output.push_str(&Self::format_history_line(message));
            }
        }
        output.push_str("============================================================\n");
        output
    }

    /// Format a broadcast chat message
    pub fn format_new_message(message: &MessageDto) -> String {
        format!(
            "\n@{}: {}\nsent at {}\n",
            message.sender_name,
            message.content,
            format_jst_rfc3339(message.created_at)
        )
    }

    /// Format one line of a history page
    pub fn format_history_line(message: &MessageDto) -> String {
        format!(
            "[{}] @{}: {}\n",
            format_jst_rfc3339(message.created_at),
            message.sender_name,
            message.content
        )
    }

    /// Format a history page
    pub fn format_history(room_id: &str, messages: &[MessageDto]) -> String {
        let mut output = format!("\nHistory of room {}:\n", room_id);
        if messages.is_empty() {
            output.push_str("(empty page)\n");
        }
        for message in messages {
            output.push_str(&Self::format_history_line(message));
        }
        output
    }

    /// Format the confirmation shown to the invitation sender
    pub fn format_invitation_sent(invitation: &InvitationDto) -> String {
        format!(
            "\nInvitation {} sent to {}\n",
            invitation.id, invitation.receiver_id
        )
    }

    /// Format the notification shown to the invitation receiver
    pub fn format_invitation_received(invitation: &InvitationDto) -> String {
        format!(
            "\n{} invited you to a private chat (/accept {} or /reject {})\n",
            invitation.sender_id, invitation.id, invitation.id
        )
    }

    /// Format the acceptance notification (both sides receive it)
    pub fn format_invitation_accepted(invitation: &InvitationDto, room: &RoomDto) -> String {
        format!(
            "\nInvitation from {} to {} accepted. Private room: {} (/join {})\n",
            invitation.sender_id, invitation.receiver_id, room.id, room.id
        )
    }

    /// Format the rejection notification
    pub fn format_invitation_rejected(invitation: &InvitationDto) -> String {
        format!("\nInvitation {} rejected\n", invitation.id)
    }

    /// Format the pending invitation list
    pub fn format_invitations(invitations: &[InvitationDto]) -> String {
        let mut output = String::from("\nPending invitations:\n");
        if invitations.is_empty() {
            output.push_str("(none)\n");
        }
        for invitation in invitations {
            output.push_str(&format!(
                "{} from {} at {}\n",
                invitation.id,
                invitation.sender_id,
                format_jst_rfc3339(invitation.created_at)
            ));
        }
        output
    }

    /// Format the user-rooms list with previews
    pub fn format_user_rooms(rooms: &[RoomPreviewDto]) -> String {
        let mut output = String::from("\nYour rooms:\n");
        for preview in rooms {
            let label = match (&preview.room.name, &preview.room.battle_ref) {
                (Some(name), _) => format!("{} ({})", name, preview.room.kind),
                (_, Some(battle_ref)) => format!("{} ({})", battle_ref, preview.room.kind),
                _ => preview.room.kind.clone(),
            };
            output.push_str(&format!("{} - {}", preview.room.id, label));
            if let Some(message) = &preview.last_message {
                output.push_str(&format!("  |  @{}: {}", message.sender_name, message.content));
            }
            output.push('\n');
        }
        output
    }

    /// Format the battle-room push
    pub fn format_battle_room(room: &RoomDto, battle_ref: &str) -> String {
        format!(
            "\nBattle {} started! Battle chat: {} (/join {})\n",
            battle_ref, room.id, room.id
        )
    }

    /// Format the party-created event
    pub fn format_party_created(room: &RoomDto) -> String {
        let name = room.name.as_deref().unwrap_or("(unnamed)");
        format!(
            "\nParty '{}' created: {} (members: {})\n",
            name,
            room.id,
            room.participants.join(", ")
        )
    }

    /// Format a server error event
    pub fn format_error(message: &str) -> String {
        format!("\n! server error: {}\n", message)
    }

    /// Format an unparseable frame as raw text
    pub fn format_raw_message(text: &str) -> String {
        format!("\n{}\n", text)
    }
}
