//! PlayerDirectory 実装
//!
//! 本来はゲーム本体のキャラクターサービスが表示名を解決します。
//! チャットサブシステム単体では identity をそのまま表示名として返す
//! 実装で代替します。

use async_trait::async_trait;

use crate::domain::{PlayerDirectory, PlayerId};

/// identity をそのまま表示名として返す PlayerDirectory 実装
pub struct PassthroughPlayerDirectory;

#[async_trait]
impl PlayerDirectory for PassthroughPlayerDirectory {
    async fn display_name(&self, identity: &PlayerId) -> String {
        identity.as_str().to_string()
    }
}
