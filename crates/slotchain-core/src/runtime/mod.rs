//! Runtime - 型消去された Slot と実行時 Pipeline
//!
//! - [`TypeTag`] / [`ErasedValue`]: 実行時の型識別と型消去された値
//! - [`RuntimeSlot`]: object-safe な slot capability（`FnSlot`, `StaticSlot`）
//! - [`RuntimePipeline`]: append 時に型チェックされる slot のチェーン

pub mod pipeline;
pub mod slot;
pub mod tag;

pub use self::pipeline::{CompositionError, RuntimePipeline};
pub use self::slot::{BoxedSlot, FnSlot, RuntimeSlot, StaticSlot};
pub use self::tag::{ErasedValue, TypeTag};
