//! WebSocket connection handlers.
//!
//! 接続直後の identity は未束縛で、join-global / join-room イベントが
//! 束縛を作る。全ての失敗は要求元ソケットへの error イベントに畳み込み、
//! 他の接続へは決して波及させない。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, ConnectionIdFactory, InvitationId, MessageContent, PlayerId, RoomId,
        RoomName,
    },
    infrastructure::dto::websocket::{ClientEvent, RoomPreviewDto, ServerEvent},
    ui::state::AppState,
    usecase::ChatError,
};

// ゲートウェイは失敗の種別を区別せず、要求元ソケットへの error イベント
// 1 種類に畳み込む。
impl From<ChatError> for ServerEvent {
    fn from(err: ChatError) -> Self {
        ServerEvent::Error {
            message: err.to_string(),
        }
    }
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives events from the rx channel and pushes them to
/// the WebSocket sender.
///
/// This handles the outbound flow: every event addressed to this connection
/// (replies, targeted pushes and room broadcasts) funnels through the one
/// mpsc channel registered with the pusher.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to generate connection id: {}", e);
            return;
        }
    };

    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .connect_client_usecase
        .execute(connection_id.clone(), tx.clone())
        .await;
    tracing::info!("Connection '{}' established", connection_id.as_str());

    // Spawn a task to push outbound events to this connection
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive events from this connection
    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Failed to parse client event: {}", e);
                            reply(
                                &tx,
                                &ServerEvent::Error {
                                    message: format!("malformed event: {e}"),
                                },
                            );
                            continue;
                        }
                    };

                    // 失敗は要求元への error イベントに畳み込む（リトライはしない）
                    if let Err(error_event) =
                        dispatch_event(&state_clone, &connection_id_clone, event).await
                    {
                        reply(&tx, &error_event);
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        connection_id_clone.as_str()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // 切断はこの接続の束縛と購読だけを壊す（ストアには触れない）
    let unbound = state.disconnect_client_usecase.execute(&connection_id).await;
    match unbound {
        Some(identity) => tracing::info!(
            "Connection '{}' (identity '{}') disconnected",
            connection_id.as_str(),
            identity.as_str()
        ),
        None => tracing::info!("Connection '{}' disconnected", connection_id.as_str()),
    }
}

/// Send an event back to the requesting connection only.
fn reply(tx: &mpsc::UnboundedSender<String>, event: &ServerEvent) {
    let json = serde_json::to_string(event).unwrap();
    if tx.send(json).is_err() {
        tracing::warn!("Requesting connection is gone, dropping reply");
    }
}

/// Route one inbound event to its use case.
///
/// Returns the error event to deliver to the requesting socket on failure.
/// Replies for the happy path are pushed through the pusher (the requesting
/// connection is registered there), so success needs no return value.
async fn dispatch_event(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    event: ClientEvent,
) -> Result<(), ServerEvent> {
    match event {
        ClientEvent::JoinGlobal { identity } => {
            let identity = PlayerId::new(identity)?;
            let snapshot = state
                .join_global_usecase
                .execute(connection_id, identity)
                .await?;
            let event = ServerEvent::JoinedGlobal {
                room: snapshot.room.into(),
                messages: snapshot.messages.into_iter().map(Into::into).collect(),
            };
            push_to_connection(state, connection_id, &event).await;
            Ok(())
        }
        ClientEvent::JoinRoom { identity, room_id } => {
            let identity = PlayerId::new(identity)?;
            let room_id = RoomId::new(room_id)?;
            let snapshot = state
                .join_room_usecase
                .execute(connection_id, identity, room_id)
                .await?;
            let event = ServerEvent::JoinedRoom {
                room: snapshot.room.into(),
                messages: snapshot.messages.into_iter().map(Into::into).collect(),
            };
            push_to_connection(state, connection_id, &event).await;
            Ok(())
        }
        ClientEvent::LeaveRoom { room_id } => {
            let room_id = RoomId::new(room_id)?;
            state
                .leave_room_usecase
                .execute(connection_id, &room_id)
                .await;
            // leave-room has no reply
            Ok(())
        }
        ClientEvent::SendMessage {
            identity,
            content,
            room_id,
        } => {
            let identity = PlayerId::new(identity)?;
            let content = MessageContent::new(content)?;
            let room_id = room_id.map(RoomId::new).transpose()?;
            let message = state
                .send_message_usecase
                .execute(identity, content, room_id)
                .await?;

            // ルームの全購読接続（送信者含む）へブロードキャスト
            let room_id = message.room_id.clone();
            let event = ServerEvent::NewMessage {
                message: message.into(),
            };
            let json = serde_json::to_string(&event).unwrap();
            state.send_message_usecase.broadcast(&room_id, &json).await;
            Ok(())
        }
        ClientEvent::GetMessages {
            room_id,
            limit,
            offset,
        } => {
            let room_id = RoomId::new(room_id)?;
            let messages = state
                .get_messages_usecase
                .execute(&room_id, limit, offset)
                .await?;
            let event = ServerEvent::MessagesHistory {
                room_id: room_id.into_string(),
                messages: messages.into_iter().map(Into::into).collect(),
            };
            push_to_connection(state, connection_id, &event).await;
            Ok(())
        }
        ClientEvent::Invite {
            sender_identity,
            receiver_identity,
        } => {
            let sender = PlayerId::new(sender_identity)?;
            let receiver = PlayerId::new(receiver_identity)?;
            let invitation = state
                .send_invitation_usecase
                .execute(sender, receiver.clone())
                .await?;

            // 送信者には確認応答
            let sent = ServerEvent::InvitationSent {
                invitation: invitation.clone().into(),
            };
            push_to_connection(state, connection_id, &sent).await;

            // 受信者がオンラインならターゲット通知（オフラインなら何もしない）
            let received = ServerEvent::InvitationReceived {
                invitation: invitation.into(),
            };
            let json = serde_json::to_string(&received).unwrap();
            let delivered = state
                .send_invitation_usecase
                .notify_receiver(&receiver, &json)
                .await;
            if !delivered {
                tracing::debug!(
                    "Receiver '{}' is offline, invitation push dropped",
                    receiver.as_str()
                );
            }
            Ok(())
        }
        ClientEvent::RespondInvitation {
            identity: _,
            invitation_id,
            accept,
        } => {
            let invitation_id = InvitationId::new(invitation_id)?;
            let outcome = state
                .respond_invitation_usecase
                .execute(&invitation_id, accept)
                .await?;

            match outcome.room {
                Some(room) => {
                    // 受諾: 応答者と（オンラインなら）招待送信者を購読させ、双方に通知
                    let sender_identity = outcome.invitation.from.clone();
                    state
                        .respond_invitation_usecase
                        .attach_to_room(connection_id, &sender_identity, &room)
                        .await;

                    let event = ServerEvent::InvitationAccepted {
                        invitation: outcome.invitation.into(),
                        room: room.into(),
                    };
                    push_to_connection(state, connection_id, &event).await;
                    let json = serde_json::to_string(&event).unwrap();
                    state
                        .respond_invitation_usecase
                        .notify_sender(&sender_identity, &json)
                        .await;
                }
                None => {
                    // 拒否: 応答者にのみ通知
                    let event = ServerEvent::InvitationRejected {
                        invitation: outcome.invitation.into(),
                    };
                    push_to_connection(state, connection_id, &event).await;
                }
            }
            Ok(())
        }
        ClientEvent::GetInvitations { identity } => {
            let identity = PlayerId::new(identity)?;
            let invitations = state.get_invitations_usecase.execute(&identity).await;
            let event = ServerEvent::InvitationsList {
                invitations: invitations.into_iter().map(Into::into).collect(),
            };
            push_to_connection(state, connection_id, &event).await;
            Ok(())
        }
        ClientEvent::GetUserRooms { identity } => {
            let identity = PlayerId::new(identity)?;
            let previews = state.get_user_rooms_usecase.execute(&identity).await?;
            let event = ServerEvent::UserRooms {
                rooms: previews
                    .into_iter()
                    .map(|preview| RoomPreviewDto {
                        room: preview.room.into(),
                        last_message: preview.last_message.map(Into::into),
                    })
                    .collect(),
            };
            push_to_connection(state, connection_id, &event).await;
            Ok(())
        }
        ClientEvent::CreateParty {
            identity,
            name,
            members,
        } => {
            let creator = PlayerId::new(identity)?;
            let name = RoomName::new(name)?;
            let members = members
                .into_iter()
                .map(PlayerId::new)
                .collect::<Result<Vec<_>, _>>()?;
            let room = state
                .create_party_room_usecase
                .execute(creator.clone(), name, members)
                .await?;

            state
                .create_party_room_usecase
                .attach_creator(connection_id, &room)
                .await;

            let event = ServerEvent::PartyCreated { room: room.clone().into() };
            push_to_connection(state, connection_id, &event).await;

            let json = serde_json::to_string(&event).unwrap();
            state
                .create_party_room_usecase
                .notify_members(&room, &creator, &json)
                .await;
            Ok(())
        }
    }
}

/// Deliver a reply event to the requesting connection through the pusher.
async fn push_to_connection(state: &Arc<AppState>, connection_id: &ConnectionId, event: &ServerEvent) {
    let json = serde_json::to_string(event).unwrap();
    if let Err(e) = state
        .connect_client_usecase
        .push_to(connection_id, &json)
        .await
    {
        tracing::warn!(
            "Failed to reply to connection '{}': {}",
            connection_id.as_str(),
            e
        );
    }
}
