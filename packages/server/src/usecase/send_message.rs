//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 宛先ルームの解決（未指定なら GLOBAL）、参加者ゲート、送信者名の非正規化
//!
//! ### なぜこのテストが必要か
//! - 参加者ゲートはプライベート/パーティ/バトルルームの機密性の根拠
//! - GLOBAL は誰でも投稿できるという例外を壊さないこと
//! - ブロードキャストは購読接続全員（送信者含む）に届くという realtime 契約
//!
//! ### どのような状況を想定しているか
//! - 正常系：GLOBAL への送信、参加ルームへの送信
//! - 異常系：存在しないルーム、非参加者からの送信

use std::sync::Arc;

use crate::domain::{
    ChatMessage, ChatStore, EventPusher, MessageContent, MessageIdFactory, PlayerDirectory,
    PlayerId, RoomId, Timestamp,
};

use super::error::ChatError;
use super::global_room::GlobalRoomCache;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
    /// EventPusher（接続管理とイベント送出の抽象化）
    pusher: Arc<dyn EventPusher>,
    /// 表示名の解決（ゲーム本体側への委譲）
    directory: Arc<dyn PlayerDirectory>,
    /// GLOBAL ルームの解決器
    global_room: Arc<GlobalRoomCache>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        store: Arc<dyn ChatStore>,
        pusher: Arc<dyn EventPusher>,
        directory: Arc<dyn PlayerDirectory>,
        global_room: Arc<GlobalRoomCache>,
    ) -> Self {
        Self {
            store,
            pusher,
            directory,
            global_room,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `identity` - 送信者のプレイヤー identity
    /// * `content` - メッセージ本文
    /// * `room_id` - 宛先ルーム（None なら GLOBAL）
    ///
    /// # Returns
    ///
    /// 永続化済みのメッセージ。ブロードキャストは呼び出し側が
    /// [`SendMessageUseCase::broadcast`] で行います（DTO への変換は UI 層の責務）。
    pub async fn execute(
        &self,
        identity: PlayerId,
        content: MessageContent,
        room_id: Option<RoomId>,
    ) -> Result<ChatMessage, ChatError> {
        use hiroba_shared::time::jst_now_millis;

        // 1. 宛先ルームを解決（未指定なら GLOBAL）
        let room_id = match room_id {
            Some(id) => id,
            None => self.global_room.resolve().await?,
        };
        let room = self
            .store
            .find_room(&room_id)
            .await
            .ok_or_else(|| ChatError::NotFound(format!("room {}", room_id.as_str())))?;

        // 2. 参加者ゲート（GLOBAL は誰でも投稿可）
        if !room.accepts_sender(&identity) {
            return Err(ChatError::NotAuthorized(format!(
                "'{}' is not a participant of room {}",
                identity.as_str(),
                room_id.as_str()
            )));
        }

        // 3. 送信者名を書き込み時点で非正規化して永続化
        let sender_name = self.directory.display_name(&identity).await;
        let message = ChatMessage::new(
            MessageIdFactory::generate()?,
            room_id,
            identity,
            sender_name,
            content,
            Timestamp::new(jst_now_millis()),
        );
        let message = self.store.append_message(message).await?;

        Ok(message)
    }

    /// 永続化済みメッセージをルームの全購読接続へブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `room_id` - 宛先ルーム ID
    /// * `json_message` - 送出する JSON イベント（UI 層で生成されたもの）
    pub async fn broadcast(&self, room_id: &RoomId, json_message: &str) {
        self.pusher.broadcast_room(room_id, json_message).await;
    }
}
