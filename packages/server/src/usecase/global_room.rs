//! GLOBAL ルームの解決とキャッシュ
//!
//! 「GLOBAL ルームはシステム全体で常にただ一つ」という不変条件を守る
//! 責務を持ちます。find-or-create は find 優先・ミス時のみ create とし、
//! キャッシュが埋まるまで毎回ストアを確認します。2 つの呼び出しが同時に
//! ミスした場合の競合はストア側の一意制約が検出し、こちらは再検索で
//! 既存ルームへ合流します。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChatStore, RepositoryError, Room, RoomId, RoomIdFactory, Timestamp};

use super::error::ChatError;

/// GLOBAL ルーム ID の解決器
///
/// 解決済みの ID をプロセス内にキャッシュします。キャッシュは揮発的で、
/// 再起動後は最初の呼び出しがストアから再解決します。
pub struct GlobalRoomCache {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
    /// 解決済み GLOBAL ルーム ID
    cached: Mutex<Option<RoomId>>,
}

impl GlobalRoomCache {
    /// 新しい GlobalRoomCache を作成
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self {
            store,
            cached: Mutex::new(None),
        }
    }

    /// GLOBAL ルーム ID を解決
    ///
    /// 1. キャッシュにあればそれを返す
    /// 2. ストアを検索し、見つかればキャッシュして返す
    /// 3. 無ければ作成する。一意制約違反（同時作成に敗けた）なら再検索して合流
    pub async fn resolve(&self) -> Result<RoomId, ChatError> {
        use hiroba_shared::time::jst_now_millis;

        let mut cached = self.cached.lock().await;
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        if let Some(room) = self.store.find_global_room().await {
            *cached = Some(room.id.clone());
            return Ok(room.id);
        }

        let room = Room::new_global(RoomIdFactory::generate()?, Timestamp::new(jst_now_millis()));
        match self.store.create_room(room).await {
            Ok(room) => {
                tracing::info!("Global room {} created", room.id.as_str());
                *cached = Some(room.id.clone());
                Ok(room.id)
            }
            Err(RepositoryError::DuplicateGlobalRoom) => {
                // 同時作成に敗けた側。勝った方のルームへ合流する
                let room = self
                    .store
                    .find_global_room()
                    .await
                    .ok_or_else(|| ChatError::Store("global room vanished".to_string()))?;
                *cached = Some(room.id.clone());
                Ok(room.id)
            }
            Err(e) => Err(e.into()),
        }
    }
}
