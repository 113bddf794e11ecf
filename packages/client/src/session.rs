//! WebSocket client session management.

use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use hiroba_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};

use crate::{
    command::{Command, HELP_TEXT},
    error::ClientError,
    formatter::MessageFormatter,
    projection::ChatProjection,
    ui::redisplay_prompt,
};

/// Run the interactive client session
pub async fn run_client_session(
    url: &str,
    identity: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type /help for commands. Press Ctrl+C to exit.\n",
        identity
    );

    let (mut write, mut read) = ws_stream.split();

    // The local projection shared between the read task (applies events)
    // and the write task (reads the active room).
    let projection = Arc::new(Mutex::new(ChatProjection::new()));

    // Bind the identity and enter the global room right away
    let join = ClientEvent::JoinGlobal {
        identity: identity.to_string(),
    };
    write
        .send(Message::Text(serde_json::to_string(&join)?.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    // Spawn a task to handle incoming events
    let identity_for_read = identity.to_string();
    let projection_for_read = projection.clone();
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => {
                            projection_for_read
                                .lock()
                                .expect("projection lock poisoned")
                                .apply(&event);
                            print!("{}", render_event(&event));
                        }
                        Err(_) => {
                            print!("{}", MessageFormatter::format_raw_message(&text));
                        }
                    }
                    redisplay_prompt(&identity_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let identity_for_prompt = identity.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", identity_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn input lines into wire events
    let identity_for_write = identity.to_string();
    let projection_for_write = projection.clone();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("{e}");
                    redisplay_prompt(&identity_for_write);
                    continue;
                }
            };

            // Local commands never reach the wire
            match command {
                Command::Help => {
                    println!("{HELP_TEXT}");
                    redisplay_prompt(&identity_for_write);
                    continue;
                }
                Command::Quit => break,
                _ => {}
            }

            let active_room = projection_for_write
                .lock()
                .expect("projection lock poisoned")
                .active_room()
                .map(|r| r.to_string());
            let event = match command.into_event(&identity_for_write, active_room.as_deref()) {
                Ok(event) => event,
                Err(e) => {
                    println!("{e}");
                    redisplay_prompt(&identity_for_write);
                    continue;
                }
            };

            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send event: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}

/// Pick the display rendering for one server event.
fn render_event(event: &ServerEvent) -> String {
    match event {
        ServerEvent::JoinedGlobal { room, messages }
        | ServerEvent::JoinedRoom { room, messages } => {
            MessageFormatter::format_joined(room, messages)
        }
        ServerEvent::NewMessage { message } => MessageFormatter::format_new_message(message),
        ServerEvent::MessagesHistory { room_id, messages } => {
            MessageFormatter::format_history(room_id, messages)
        }
        ServerEvent::InvitationSent { invitation } => {
            MessageFormatter::format_invitation_sent(invitation)
        }
        ServerEvent::InvitationReceived { invitation } => {
            MessageFormatter::format_invitation_received(invitation)
        }
        ServerEvent::InvitationAccepted { invitation, room } => {
            MessageFormatter::format_invitation_accepted(invitation, room)
        }
        ServerEvent::InvitationRejected { invitation } => {
            MessageFormatter::format_invitation_rejected(invitation)
        }
        ServerEvent::InvitationsList { invitations } => {
            MessageFormatter::format_invitations(invitations)
        }
        ServerEvent::UserRooms { rooms } => MessageFormatter::format_user_rooms(rooms),
        ServerEvent::BattleRoomCreated { room, battle_ref } => {
            MessageFormatter::format_battle_room(room, battle_ref)
        }
        ServerEvent::PartyCreated { room } => MessageFormatter::format_party_created(room),
        ServerEvent::Error { message } => MessageFormatter::format_error(message),
    }
}
