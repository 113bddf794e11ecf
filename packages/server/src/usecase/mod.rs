//! UseCase 層
//!
//! ルーム・メッセージ・招待のビジネスルールと、接続ライフサイクルの
//! オーケストレーション。各ユースケースは `ChatStore` / `EventPusher` /
//! `PlayerDirectory` の trait にのみ依存します。

pub mod connect_client;
pub mod create_battle_room;
pub mod create_party_room;
pub mod disconnect_client;
pub mod error;
pub mod get_invitations;
pub mod get_messages;
pub mod get_room_detail;
pub mod get_rooms;
pub mod get_user_rooms;
pub mod global_room;
pub mod join_global;
pub mod join_room;
pub mod leave_room;
pub mod respond_invitation;
pub mod send_invitation;
pub mod send_message;

pub use connect_client::ConnectClientUseCase;
pub use create_battle_room::CreateBattleRoomUseCase;
pub use create_party_room::CreatePartyRoomUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::ChatError;
pub use get_invitations::GetInvitationsUseCase;
pub use get_messages::GetMessagesUseCase;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use get_user_rooms::{GetUserRoomsUseCase, RoomPreview};
pub use global_room::GlobalRoomCache;
pub use join_global::{HISTORY_PAGE_SIZE, JoinGlobalUseCase, JoinSnapshot};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use respond_invitation::{InvitationOutcome, RespondInvitationUseCase};
pub use send_invitation::SendInvitationUseCase;
pub use send_message::SendMessageUseCase;
