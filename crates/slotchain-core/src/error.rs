use thiserror::Error;

use crate::runtime::CompositionError;
use crate::small_fn::CallError;

/// Crate-level error.
///
/// Storage-capacity violations are build errors and have no variant here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotchainError {
    #[error(transparent)]
    Call(#[from] CallError),

    #[error(transparent)]
    Composition(#[from] CompositionError),
}

pub type Error = SlotchainError;
