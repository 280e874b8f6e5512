//! RuntimeSlot - 型消去された Slot
//!
//! # 二層構造
//! - **表層（Typed）**: `FnSlot<In, Out, F>`, `StaticSlot<S: Step>` - 型安全
//! - **内部（Dyn）**: `dyn RuntimeSlot` - object-safe, type erasure
//!
//! 入出力型は構築時に固定され、[`TypeTag`] として報告されます。
//! 型の整合性は [`RuntimePipeline::append`](super::RuntimePipeline::append)
//! 時に前倒しでチェックされます。

use std::fmt;
use std::marker::PhantomData;

use crate::chain::Step;

use super::tag::{ErasedValue, TypeTag};

/// Object-safe slot capability: report tags, invoke on an erased value.
pub trait RuntimeSlot {
    fn input_tag(&self) -> TypeTag;

    fn output_tag(&self) -> TypeTag;

    /// Apply the slot to a value of its input type.
    ///
    /// Returns `None` only when `input` does not carry the declared input type,
    /// which a type-checked pipeline never passes.
    fn invoke(&self, input: ErasedValue) -> Option<ErasedValue>;
}

pub type BoxedSlot = Box<dyn RuntimeSlot>;

fn apply<In: 'static, Out: 'static>(
    input: ErasedValue,
    expected: TypeTag,
    f: impl FnOnce(In) -> Out,
) -> Option<ErasedValue> {
    match input.downcast::<In>() {
        Ok(value) => Some(ErasedValue::new(f(value))),
        Err(value) => {
            tracing::error!(
                expected = %expected,
                found = %value.tag(),
                "erased value does not match slot input"
            );
            None
        }
    }
}

/// A single callable as a runtime slot.
pub struct FnSlot<In, Out, F> {
    func: F,
    _marker: PhantomData<fn(In) -> Out>,
}

impl<In, Out, F> FnSlot<In, Out, F>
where
    F: Fn(In) -> Out,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            _marker: PhantomData,
        }
    }
}

impl<In, Out, F> RuntimeSlot for FnSlot<In, Out, F>
where
    In: 'static,
    Out: 'static,
    F: Fn(In) -> Out,
{
    fn input_tag(&self) -> TypeTag {
        TypeTag::of::<In>()
    }

    fn output_tag(&self) -> TypeTag {
        TypeTag::of::<Out>()
    }

    fn invoke(&self, input: ErasedValue) -> Option<ErasedValue> {
        apply(input, self.input_tag(), |value: In| (self.func)(value))
    }
}

impl<In, Out, F> fmt::Debug for FnSlot<In, Out, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSlot")
            .field("input", &std::any::type_name::<In>())
            .field("output", &std::any::type_name::<Out>())
            .finish()
    }
}

/// A pre-composed [`Step`] adapted as one opaque runtime slot.
#[derive(Debug, Clone)]
pub struct StaticSlot<S> {
    step: S,
}

impl<S: Step> StaticSlot<S> {
    pub fn new(step: S) -> Self {
        Self { step }
    }
}

impl<S> RuntimeSlot for StaticSlot<S>
where
    S: Step,
    S::Input: 'static,
    S::Output: 'static,
{
    fn input_tag(&self) -> TypeTag {
        TypeTag::of::<S::Input>()
    }

    fn output_tag(&self) -> TypeTag {
        TypeTag::of::<S::Output>()
    }

    fn invoke(&self, input: ErasedValue) -> Option<ErasedValue> {
        apply(input, self.input_tag(), |value: S::Input| self.step.call(value))
    }
}
