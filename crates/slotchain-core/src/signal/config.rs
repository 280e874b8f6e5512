//! SignalConfig / SignalBuilder - Signal の構築
//!
//! # 使用例
//! ```
//! use slotchain_core::{Signal, SignalBuilder};
//!
//! let signal: Signal<u32> = SignalBuilder::new()
//!     .name("ticks")
//!     .static_capacity(8)
//!     .build();
//! assert_eq!(signal.name(), Some("ticks"));
//! ```

use serde::{Deserialize, Serialize};

use super::Signal;

/// Construction-time settings for a [`Signal`].
///
/// Capacities are reservation hints only; both sequences still grow on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Label attached to log events.
    pub name: Option<String>,
    pub static_capacity: usize,
    pub pipeline_capacity: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SignalBuilder {
    config: SignalConfig,
}

impl SignalBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    pub fn static_capacity(mut self, capacity: usize) -> Self {
        self.config.static_capacity = capacity;
        self
    }

    pub fn pipeline_capacity(mut self, capacity: usize) -> Self {
        self.config.pipeline_capacity = capacity;
        self
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    pub fn build<T: 'static, const N: usize>(self) -> Signal<T, N> {
        Signal::with_config(self.config)
    }
}
