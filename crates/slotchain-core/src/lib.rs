//! slotchain-core
//!
//! In-process signal/slot dispatch: a [`Signal`] fans one value out to
//! static subscriptions and runtime-composed pipelines.
//!
//! # モジュール構成
//! - **small_fn**: 固定容量インラインストレージの型消去 callable（ヒープ不使用）
//! - **connection**: Subscription Token, `Connection`（Weak）, `ScopedConnection`（RAII）
//! - **chain**: Static pipeline（`Step` trait, `make_slot`, `compose` / `|`）
//! - **runtime**: 型消去された `RuntimeSlot` と型チェック付き `RuntimePipeline`
//! - **signal**: `Signal`, `SignalBuilder`, `SignalStatus`
//! - **ids**: ULID ベースの ID
//!
//! # 例
//! ```
//! use slotchain_core::{Signal, make_slot};
//!
//! let mut signal = Signal::<i32>::new();
//!
//! signal.connect(make_slot(|x: i32| x * 2) | make_slot(|x: i32| assert_eq!(x, 42)));
//!
//! signal
//!     .connect_runtime()
//!     .add_static(make_slot(|x: i32| x * 3) | make_slot(|x: i32| x - 1))?
//!     .add_slot(|x: i32| assert_eq!(x, 62))?;
//!
//! signal.emit(21);
//! # Ok::<(), slotchain_core::CompositionError>(())
//! ```

pub mod chain;
pub mod connection;
pub mod error;
pub mod ids;
pub mod runtime;
pub mod signal;
pub mod small_fn;

pub use self::chain::{Pipeline, Slot, Step, compose, make_slot};
pub use self::connection::{Connection, ScopedConnection};
pub use self::error::{Error, SlotchainError};
pub use self::ids::{ConnectionId, SignalId};
pub use self::runtime::{
    BoxedSlot, CompositionError, ErasedValue, FnSlot, RuntimePipeline, RuntimeSlot, StaticSlot,
    TypeTag,
};
pub use self::signal::{Signal, SignalBuilder, SignalConfig, SignalStatus, SubscriptionCounts};
pub use self::small_fn::{CallError, DEFAULT_CAPACITY, STORAGE_ALIGN, SmallFn};
