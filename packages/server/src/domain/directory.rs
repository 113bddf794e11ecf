//! PlayerDirectory trait 定義
//!
//! 送信者表示名の解決をゲーム本体（キャラクターサービス）へ委ねるための
//! ポート。本リポジトリの範囲では identity をそのまま表示名として返す
//! 実装を Infrastructure 層が提供します。

use async_trait::async_trait;

use super::value_object::PlayerId;

/// 送信者 identity から表示名を解決するインターフェース
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// identity の表示名を取得（メッセージ書き込み時に非正規化される）
    async fn display_name(&self, identity: &PlayerId) -> String;
}
