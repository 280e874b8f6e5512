//! Identifiers (strongly-typed, ULID ベース).
//!
//! Subscription Token と Signal はそれぞれ ULID の ID を持ちます。
//! ログ (`tracing` の field) と [`SignalStatus`](crate::signal::SignalStatus)
//! で「どの購読か」「どの Signal か」を識別するためのものです。
//!
//! ## Phantom Type パターン
//! `Id<T>` で共通実装を提供し、`T` は実行時には使わないマーカー型です。
//! `ConnectionId` と `SignalId` は混同できません。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"conn-", "signal-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    /// 新しい ULID で Id を発行
    pub fn generate() -> Self {
        Self::from_ulid(Ulid::new())
    }

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Subscription Token のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Conn {}

impl IdMarker for Conn {
    fn prefix() -> &'static str {
        "conn-"
    }
}

/// Signal のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sig {}

impl IdMarker for Sig {
    fn prefix() -> &'static str {
        "signal-"
    }
}

/// Identifier of a Subscription Token (one static subscription or one runtime pipeline).
pub type ConnectionId = Id<Conn>;

/// Identifier of a Signal.
pub type SignalId = Id<Sig>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_their_prefix() {
        let conn = ConnectionId::generate();
        let signal = SignalId::generate();

        assert!(conn.to_string().starts_with("conn-"));
        assert!(signal.to_string().starts_with("signal-"));

        // let _: SignalId = conn; // <- does not compile
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn ids_can_be_serialized() {
        let id = SignalId::from_ulid(Ulid::new());

        let serialized = serde_json::to_string(&id).unwrap();
        let deserialized: SignalId = serde_json::from_str(&serialized).unwrap();

        assert_eq!(id, deserialized);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<ConnectionId>(), size_of::<Ulid>());
        assert_eq!(size_of::<SignalId>(), size_of::<Ulid>());
    }
}
