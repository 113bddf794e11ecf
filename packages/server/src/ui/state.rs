//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::{ChatStore, EventPusher, PlayerDirectory};
use crate::usecase::{
    ConnectClientUseCase, CreateBattleRoomUseCase, CreatePartyRoomUseCase,
    DisconnectClientUseCase, GetInvitationsUseCase, GetMessagesUseCase, GetRoomDetailUseCase,
    GetRoomsUseCase, GetUserRoomsUseCase, GlobalRoomCache, JoinGlobalUseCase, JoinRoomUseCase,
    LeaveRoomUseCase, RespondInvitationUseCase, SendInvitationUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub join_global_usecase: Arc<JoinGlobalUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub get_messages_usecase: Arc<GetMessagesUseCase>,
    pub send_invitation_usecase: Arc<SendInvitationUseCase>,
    pub respond_invitation_usecase: Arc<RespondInvitationUseCase>,
    pub get_invitations_usecase: Arc<GetInvitationsUseCase>,
    pub get_user_rooms_usecase: Arc<GetUserRoomsUseCase>,
    pub create_party_room_usecase: Arc<CreatePartyRoomUseCase>,
    pub create_battle_room_usecase: Arc<CreateBattleRoomUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl AppState {
    /// Wire every use case from the three ports.
    ///
    /// Dependency order mirrors the binary: repository and pusher first,
    /// then the global-room resolver shared by the use cases that need it.
    pub fn new(
        store: Arc<dyn ChatStore>,
        pusher: Arc<dyn EventPusher>,
        directory: Arc<dyn PlayerDirectory>,
    ) -> Self {
        let global_room = Arc::new(GlobalRoomCache::new(store.clone()));

        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(pusher.clone())),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(pusher.clone())),
            join_global_usecase: Arc::new(JoinGlobalUseCase::new(
                store.clone(),
                pusher.clone(),
                global_room.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(store.clone(), pusher.clone())),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(pusher.clone())),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                store.clone(),
                pusher.clone(),
                directory,
                global_room.clone(),
            )),
            get_messages_usecase: Arc::new(GetMessagesUseCase::new(store.clone())),
            send_invitation_usecase: Arc::new(SendInvitationUseCase::new(
                store.clone(),
                pusher.clone(),
            )),
            respond_invitation_usecase: Arc::new(RespondInvitationUseCase::new(
                store.clone(),
                pusher.clone(),
            )),
            get_invitations_usecase: Arc::new(GetInvitationsUseCase::new(store.clone())),
            get_user_rooms_usecase: Arc::new(GetUserRoomsUseCase::new(
                store.clone(),
                global_room,
            )),
            create_party_room_usecase: Arc::new(CreatePartyRoomUseCase::new(
                store.clone(),
                pusher.clone(),
            )),
            create_battle_room_usecase: Arc::new(CreateBattleRoomUseCase::new(
                store.clone(),
                pusher,
            )),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(store.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(store)),
        }
    }
}
