//! Compile-time composition of two steps.

use std::ops::BitOr;

use super::step::Step;

/// Two composed steps computing `second(first(x))`.
///
/// A pipeline is itself a [`Step`], so chains nest to any depth without
/// extra indirection.
#[derive(Debug, Clone)]
pub struct Pipeline<F, G> {
    first: F,
    second: G,
}

/// Compose `first` then `second`.
///
/// Accepted only when `first`'s output type equals `second`'s input type:
///
/// ```compile_fail
/// use slotchain_core::{compose, make_slot};
///
/// // i32 output cannot feed a String input.
/// let _ = compose(make_slot(|x: i32| x * 2), make_slot(|s: String| s.len()));
/// ```
pub fn compose<F, G>(first: F, second: G) -> Pipeline<F, G>
where
    F: Step,
    G: Step<Input = F::Output>,
{
    Pipeline { first, second }
}

impl<F, G> Step for Pipeline<F, G>
where
    F: Step,
    G: Step<Input = F::Output>,
{
    type Input = F::Input;
    type Output = G::Output;

    fn call(&self, input: F::Input) -> G::Output {
        self.second.call(self.first.call(input))
    }
}

impl<F, G, H> BitOr<H> for Pipeline<F, G>
where
    F: Step,
    G: Step<Input = F::Output>,
    H: Step<Input = G::Output>,
{
    type Output = Pipeline<Self, H>;

    fn bitor(self, next: H) -> Pipeline<Self, H> {
        compose(self, next)
    }
}
