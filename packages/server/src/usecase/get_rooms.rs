//! UseCase: ルーム一覧取得処理（運用 API 向け）

use std::sync::Arc;

use crate::domain::{ChatStore, Room};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    store: Arc<dyn ChatStore>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    /// 全ルームを取得
    pub async fn execute(&self) -> Vec<Room> {
        self.store.list_rooms().await
    }
}
