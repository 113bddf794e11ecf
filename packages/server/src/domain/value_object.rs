//! 値オブジェクト定義
//!
//! プリミティブ型（String, i64）を直接引き回さず、バリデーション済みの
//! 型として扱うための newtype 群。不正な値はこの層で弾かれるため、
//! UseCase 層以降は常に妥当な値だけを扱えます。

use serde::Serialize;
use uuid::Uuid;

use super::error::ValueError;

/// プレイヤーの識別子
///
/// 認可と宛先解決に使う安定した識別子。どの接続（ソケット）とも独立で、
/// ゲーム本体側のプレイヤー/キャラクター参照に対応する不透明な値です。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub const MAX_LENGTH: usize = 64;

    /// 新しい PlayerId を作成（空文字・長すぎる値は拒否）
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.is_empty() {
            return Err(ValueError::Empty("player id"));
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ValueError::TooLong {
                field: "player id",
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PlayerId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// メッセージ本文
///
/// 空文字と 500 文字超は拒否します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageContent(String);

impl MessageContent {
    pub const MAX_LENGTH: usize = 500;

    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::Empty("message content"));
        }
        if value.chars().count() > Self::MAX_LENGTH {
            return Err(ValueError::TooLong {
                field: "message content",
                max: Self::MAX_LENGTH,
                actual: value.chars().count(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// パーティルームの表示名
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    pub const MAX_LENGTH: usize = 32;

    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::Empty("room name"));
        }
        if value.chars().count() > Self::MAX_LENGTH {
            return Err(ValueError::TooLong {
                field: "room name",
                max: Self::MAX_LENGTH,
                actual: value.chars().count(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// バトルルームに紐づく外部参照（戦闘サブシステム側の戦闘 ID）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BattleRef(String);

impl BattleRef {
    pub const MAX_LENGTH: usize = 64;

    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.is_empty() {
            return Err(ValueError::Empty("battle ref"));
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ValueError::TooLong {
                field: "battle ref",
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unix タイムスタンプ（JST, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// uuid ベースの識別子を生成するマクロ的ボイラープレート
///
/// RoomId / MessageId / InvitationId / ConnectionId はどれも
/// 「uuid v4 文字列を保持する不透明 ID」で、対応する Factory が生成を担います。
macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident, $factory:ident, $field:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: String) -> Result<Self, ValueError> {
                if value.is_empty() {
                    return Err(ValueError::Empty($field));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        pub struct $factory;

        impl $factory {
            /// uuid v4 で新しい ID を生成
            pub fn generate() -> Result<$name, ValueError> {
                $name::new(Uuid::new_v4().to_string())
            }
        }
    };
}

uuid_id!(
    /// ルームの識別子
    RoomId,
    RoomIdFactory,
    "room id"
);

uuid_id!(
    /// メッセージの識別子
    MessageId,
    MessageIdFactory,
    "message id"
);

uuid_id!(
    /// 招待の識別子
    InvitationId,
    InvitationIdFactory,
    "invitation id"
);

uuid_id!(
    /// 接続（ソケット）の識別子
    ///
    /// プレイヤー識別子とは独立した、ゲートウェイ内部だけで使う値。
    /// プロセス再起動で失われる揮発的な識別子です。
    ConnectionId,
    ConnectionIdFactory,
    "connection id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_accepts_valid_value() {
        // テスト項目: 妥当な文字列から PlayerId を作成できる
        // given (前提条件):
        let value = "player-12".to_string();

        // when (操作):
        let result = PlayerId::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "player-12");
    }

    #[test]
    fn test_player_id_rejects_empty_value() {
        // テスト項目: 空文字の PlayerId は拒否される
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = PlayerId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueError::Empty("player id")));
    }

    #[test]
    fn test_player_id_rejects_too_long_value() {
        // テスト項目: 上限を超える長さの PlayerId は拒否される
        // given (前提条件):
        let value = "x".repeat(PlayerId::MAX_LENGTH + 1);

        // when (操作):
        let result = PlayerId::new(value);

        // then (期待する結果):
        assert!(matches!(result, Err(ValueError::TooLong { .. })));
    }

    #[test]
    fn test_message_content_rejects_whitespace_only() {
        // テスト項目: 空白のみのメッセージ本文は拒否される
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = MessageContent::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueError::Empty("message content")));
    }

    #[test]
    fn test_message_content_accepts_max_length() {
        // テスト項目: 上限ちょうどの長さのメッセージ本文は受理される
        // given (前提条件):
        let value = "a".repeat(MessageContent::MAX_LENGTH);

        // when (操作):
        let result = MessageContent::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_message_content_rejects_over_max_length() {
        // テスト項目: 上限を超えるメッセージ本文は拒否される
        // given (前提条件):
        let value = "a".repeat(MessageContent::MAX_LENGTH + 1);

        // when (操作):
        let result = MessageContent::new(value);

        // then (期待する結果):
        assert!(matches!(result, Err(ValueError::TooLong { .. })));
    }

    #[test]
    fn test_room_id_factory_generates_unique_ids() {
        // テスト項目: RoomIdFactory が毎回異なる ID を生成する
        // given (前提条件):

        // when (操作):
        let id1 = RoomIdFactory::generate().unwrap();
        let id2 = RoomIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_room_name_rejects_empty() {
        // テスト項目: 空のルーム名は拒否される
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = RoomName::new(value);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_timestamp_preserves_value() {
        // テスト項目: Timestamp が元のミリ秒値を保持する
        // given (前提条件):
        let millis = 1722700800000;

        // when (操作):
        let timestamp = Timestamp::new(millis);

        // then (期待する結果):
        assert_eq!(timestamp.value(), millis);
    }
}
