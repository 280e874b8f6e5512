//! Connection - 購読の生存管理
//!
//! # 三層構造
//! - **ConnectionNode**: `AtomicBool` 1 つの Subscription Token（`Arc` で共有）
//! - **Connection**: `Weak` で token を参照する非所有ハンドル
//! - **ScopedConnection**: drop 時に 1 回だけ disconnect する RAII ガード
//!
//! token が先に破棄されても、ハンドルは「切断済み」を観測するだけで
//! クラッシュしません。

pub mod handle;
pub mod node;
pub mod scoped;

pub use self::handle::Connection;
pub use self::node::ConnectionNode;
pub use self::scoped::ScopedConnection;
