//! Step trait と単一 Slot
//!
//! # 学習ポイント
//! - Associated types (`Input`, `Output`) で入出力型をコンパイル時に記録
//! - `PhantomData<fn(In) -> Out>` で型パラメータを「使う」(所有はしない)
//! - 演算子オーバーロード (`BitOr`) による合成

use std::fmt;
use std::marker::PhantomData;
use std::ops::BitOr;

use super::pipeline::{Pipeline, compose};

/// A typed unary step whose input and output types are known statically.
pub trait Step {
    type Input;
    type Output;

    fn call(&self, input: Self::Input) -> Self::Output;

    /// Compose `self` with `next`; same as [`compose`].
    fn then<G>(self, next: G) -> Pipeline<Self, G>
    where
        Self: Sized,
        G: Step<Input = Self::Output>,
    {
        compose(self, next)
    }
}

/// A single wrapped callable with recorded input/output types.
pub struct Slot<In, Out, F> {
    func: F,
    _marker: PhantomData<fn(In) -> Out>,
}

/// Wrap `func` as a typed [`Slot`].
///
/// ```
/// use slotchain_core::{Step, make_slot};
///
/// let triple = make_slot(|x: i32| x * 3);
/// assert_eq!(triple.call(4), 12);
/// ```
pub fn make_slot<In, Out, F>(func: F) -> Slot<In, Out, F>
where
    F: Fn(In) -> Out,
{
    Slot {
        func,
        _marker: PhantomData,
    }
}

impl<In, Out, F> Step for Slot<In, Out, F>
where
    F: Fn(In) -> Out,
{
    type Input = In;
    type Output = Out;

    fn call(&self, input: In) -> Out {
        (self.func)(input)
    }
}

impl<In, Out, F: Clone> Clone for Slot<In, Out, F> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
            _marker: PhantomData,
        }
    }
}

impl<In, Out, F> fmt::Debug for Slot<In, Out, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("input", &std::any::type_name::<In>())
            .field("output", &std::any::type_name::<Out>())
            .finish()
    }
}

impl<In, Out, F, G> BitOr<G> for Slot<In, Out, F>
where
    F: Fn(In) -> Out,
    G: Step<Input = Out>,
{
    type Output = Pipeline<Self, G>;

    fn bitor(self, next: G) -> Pipeline<Self, G> {
        compose(self, next)
    }
}
