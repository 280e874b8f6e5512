//! RuntimePipeline - 実行時に組み立てる型チェック付きチェーン
//!
//! # 型チェックの前倒し
//! - `append` 時: 新しい slot の入力 tag とチェーン末尾の出力 tag を比較
//! - 不一致なら [`CompositionError::TypeMismatch`]、チェーンは変更しない
//! - `invoke` 時: 追加のチェックはしない（append で保証済み）
//!
//! 空のチェーンの末尾は Signal のペイロード型 `T` です。

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::chain::Step;
use crate::connection::{Connection, ConnectionNode};
use crate::ids::ConnectionId;

use super::slot::{BoxedSlot, FnSlot, RuntimeSlot, StaticSlot};
use super::tag::{ErasedValue, TypeTag};

/// CompositionError は append 時の型不一致
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    #[error("incompatible slot: chain produces `{expected}` but slot expects `{found}`")]
    TypeMismatch { expected: TypeTag, found: TypeTag },
}

/// Ordered, type-checked chain of [`RuntimeSlot`]s fed with values of `T`.
///
/// The pipeline owns one Subscription Token and is disconnected as a unit.
/// Slots are append-only.
///
/// # 使用例
/// ```
/// use slotchain_core::RuntimePipeline;
///
/// let mut rp = RuntimePipeline::<i32>::new();
/// rp.add_slot(|x: i32| x * 3)?.add_slot(|x: i32| x - 1)?;
///
/// let out = rp.invoke(4).and_then(|v| v.downcast::<i32>().ok());
/// assert_eq!(out, Some(11));
/// # Ok::<(), slotchain_core::CompositionError>(())
/// ```
pub struct RuntimePipeline<T> {
    node: Arc<ConnectionNode>,
    slots: Vec<BoxedSlot>,
    _input: PhantomData<fn(T)>,
}

impl<T: 'static> RuntimePipeline<T> {
    pub fn new() -> Self {
        Self {
            node: Arc::new(ConnectionNode::new()),
            slots: Vec::new(),
            _input: PhantomData,
        }
    }

    pub fn input_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }

    /// Output tag of the chain tail (`T` while empty).
    pub fn output_tag(&self) -> TypeTag {
        self.slots
            .last()
            .map_or_else(|| self.input_tag(), |slot| slot.output_tag())
    }

    /// Append an already-erased slot after checking it against the chain tail.
    pub fn append_boxed(&mut self, slot: BoxedSlot) -> Result<&mut Self, CompositionError> {
        let expected = self.output_tag();
        let found = slot.input_tag();
        if expected != found {
            tracing::warn!(
                connection = %self.node.id(),
                expected = %expected,
                found = %found,
                "rejected incompatible slot"
            );
            return Err(CompositionError::TypeMismatch { expected, found });
        }

        tracing::debug!(
            connection = %self.node.id(),
            input = %found,
            output = %slot.output_tag(),
            position = self.slots.len(),
            "slot appended"
        );
        self.slots.push(slot);
        Ok(self)
    }

    pub fn append<S>(&mut self, slot: S) -> Result<&mut Self, CompositionError>
    where
        S: RuntimeSlot + 'static,
    {
        self.append_boxed(Box::new(slot))
    }

    /// Append a single callable.
    pub fn add_slot<In, Out, F>(&mut self, func: F) -> Result<&mut Self, CompositionError>
    where
        In: 'static,
        Out: 'static,
        F: Fn(In) -> Out + 'static,
    {
        self.append(FnSlot::new(func))
    }

    /// Append a statically composed chain as one opaque link.
    pub fn add_static<S>(&mut self, step: S) -> Result<&mut Self, CompositionError>
    where
        S: Step + 'static,
        S::Input: 'static,
        S::Output: 'static,
    {
        self.append(StaticSlot::new(step))
    }

    /// Thread `value` through every slot in order.
    ///
    /// `None` when the pipeline is disconnected, empty, or ends in a sink.
    pub fn invoke(&self, value: T) -> Option<ErasedValue> {
        if !self.node.is_connected() || self.slots.is_empty() {
            return None;
        }

        let mut current = ErasedValue::new(value);
        for slot in &self.slots {
            current = slot.invoke(current)?;
        }

        if current.tag().is_unit() {
            None
        } else {
            Some(current)
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.node.id()
    }

    /// Handle to this pipeline's token.
    pub fn connection(&self) -> Connection {
        Connection::new(&self.node)
    }

    pub fn disconnect(&self) {
        self.connection().disconnect();
    }

    pub fn is_connected(&self) -> bool {
        self.node.is_connected()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T: 'static> Default for RuntimePipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for RuntimePipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain: Vec<String> = self
            .slots
            .iter()
            .map(|slot| format!("{} -> {}", slot.input_tag(), slot.output_tag()))
            .collect();
        f.debug_struct("RuntimePipeline")
            .field("connection", &self.id())
            .field("connected", &self.is_connected())
            .field("chain", &chain)
            .finish()
    }
}
