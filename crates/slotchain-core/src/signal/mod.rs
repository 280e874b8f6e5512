//! Signal - 1 つの値を全購読者へ配信するブロードキャスト点
//!
//! # 配信順序（固定の契約）
//! 1. static subscription を登録順に（切断済みはスキップ）
//! 2. runtime pipeline を登録順に（切断済みはスキップ）
//!
//! # 再入
//! - `emit` は `&self` なので、購読者の中から同じ Signal へ再入して
//!   `emit` できます（`Rc<RefCell<Signal<_>>>` 経由なら `borrow()`）。
//! - `connect*` は `&mut self` が必要なので、配信中の登録は型で拒否されます
//!   （`RefCell` 共有なら `try_borrow_mut` が失敗します）。
//!
//! # エラー
//! 購読者内の panic は捕捉しません。`emit` の呼び出し元へ伝播し、
//! 残りの購読者は呼ばれません。

pub mod config;
pub mod status;

use std::fmt;
use std::sync::Arc;

use crate::chain::{Step, make_slot};
use crate::connection::{Connection, ConnectionNode, ScopedConnection};
use crate::ids::SignalId;
use crate::runtime::RuntimePipeline;
use crate::small_fn::{DEFAULT_CAPACITY, SmallFn};

pub use self::config::{SignalBuilder, SignalConfig};
pub use self::status::{SignalStatus, SubscriptionCounts};

/// One static subscription: its token and its terminal callable.
struct StaticEntry<T, const N: usize> {
    node: Arc<ConnectionNode>,
    func: SmallFn<T, (), N>,
}

/// Broadcast point for values of `T`.
///
/// Static subscriptions are stored inline in a [`SmallFn`] of capacity `N`.
/// Entries are never removed, only marked dead through their token.
///
/// # 使用例
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use slotchain_core::{Signal, make_slot};
///
/// let mut signal = Signal::<i32>::new();
/// let seen = Rc::new(Cell::new(0));
/// let sink = Rc::clone(&seen);
/// let conn = signal.connect(make_slot(move |x: i32| sink.set(x)));
///
/// signal.emit(7);
/// conn.disconnect();
/// signal.emit(8);
/// assert_eq!(seen.get(), 7);
/// ```
pub struct Signal<T, const N: usize = DEFAULT_CAPACITY> {
    id: SignalId,
    name: Option<String>,
    statics: Vec<StaticEntry<T, N>>,
    pipelines: Vec<RuntimePipeline<T>>,
}

impl<T: 'static, const N: usize> Signal<T, N> {
    pub fn new() -> Self {
        Self::with_config(SignalConfig::default())
    }

    pub fn with_config(config: SignalConfig) -> Self {
        Self {
            id: SignalId::generate(),
            name: config.name,
            statics: Vec::with_capacity(config.static_capacity),
            pipelines: Vec::with_capacity(config.pipeline_capacity),
        }
    }

    pub fn id(&self) -> SignalId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Subscribe a terminal step. Its output, if any, is discarded.
    ///
    /// Takes a [`Step`] (`make_slot(..)` or a composed chain); use
    /// [`connect_fn`](Self::connect_fn) for a bare closure.
    pub fn connect<S>(&mut self, slot: S) -> Connection
    where
        S: Step<Input = T> + Clone + 'static,
    {
        let node = Arc::new(ConnectionNode::new());
        let func = SmallFn::new(move |value: T| {
            let _ = slot.call(value);
        });

        tracing::debug!(
            signal = %self.id,
            name = self.name.as_deref(),
            connection = %node.id(),
            position = self.statics.len(),
            "static subscription connected"
        );
        let connection = Connection::new(&node);
        self.statics.push(StaticEntry { node, func });
        connection
    }

    /// Like [`connect`](Self::connect), revoked when the guard is dropped.
    pub fn connect_scoped<S>(&mut self, slot: S) -> ScopedConnection
    where
        S: Step<Input = T> + Clone + 'static,
    {
        ScopedConnection::new(self.connect(slot))
    }

    /// Subscribe a bare closure; same as `connect(make_slot(func))`.
    pub fn connect_fn<F, R>(&mut self, func: F) -> Connection
    where
        F: Fn(T) -> R + Clone + 'static,
        R: 'static,
    {
        self.connect(make_slot(func))
    }

    /// Scoped form of [`connect_fn`](Self::connect_fn).
    pub fn connect_fn_scoped<F, R>(&mut self, func: F) -> ScopedConnection
    where
        F: Fn(T) -> R + Clone + 'static,
        R: 'static,
    {
        ScopedConnection::new(self.connect_fn(func))
    }

    /// Register a new, empty runtime pipeline and hand it back for population.
    ///
    /// The pipeline is live immediately.
    pub fn connect_runtime(&mut self) -> &mut RuntimePipeline<T> {
        let pipeline = RuntimePipeline::<T>::new();
        tracing::debug!(
            signal = %self.id,
            name = self.name.as_deref(),
            connection = %pipeline.id(),
            position = self.pipelines.len(),
            "runtime pipeline connected"
        );

        let index = self.pipelines.len();
        self.pipelines.push(pipeline);
        &mut self.pipelines[index]
    }

    /// Mark every subscription and pipeline of this signal dead.
    pub fn disconnect_all(&self) {
        for entry in &self.statics {
            entry.node.disconnect();
        }
        for pipeline in &self.pipelines {
            pipeline.disconnect();
        }
        tracing::debug!(
            signal = %self.id,
            name = self.name.as_deref(),
            "all subscriptions disconnected"
        );
    }

    pub fn status(&self) -> SignalStatus {
        SignalStatus {
            signal_id: self.id,
            name: self.name.clone(),
            statics: SubscriptionCounts {
                total: self.statics.len(),
                live: self
                    .statics
                    .iter()
                    .filter(|entry| entry.node.is_connected())
                    .count(),
            },
            pipelines: SubscriptionCounts {
                total: self.pipelines.len(),
                live: self
                    .pipelines
                    .iter()
                    .filter(|pipeline| pipeline.is_connected())
                    .count(),
            },
        }
    }
}

impl<T: Clone + 'static, const N: usize> Signal<T, N> {
    /// Deliver `value` to every live subscriber, statics first, then pipelines.
    pub fn emit(&self, value: T) {
        tracing::trace!(
            signal = %self.id,
            name = self.name.as_deref(),
            statics = self.statics.len(),
            pipelines = self.pipelines.len(),
            "emit"
        );

        for entry in &self.statics {
            if !entry.node.is_connected() {
                continue;
            }
            if let Err(err) = entry.func.call(value.clone()) {
                tracing::error!(
                    signal = %self.id,
                    connection = %entry.node.id(),
                    %err,
                    "static subscription skipped"
                );
            }
        }

        for pipeline in &self.pipelines {
            if !pipeline.is_connected() {
                continue;
            }
            if let Some(output) = pipeline.invoke(value.clone()) {
                tracing::trace!(
                    signal = %self.id,
                    output = %output.tag(),
                    "pipeline result discarded"
                );
            }
        }
    }
}

impl<T: 'static, const N: usize> Default for Signal<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static, const N: usize> fmt::Debug for Signal<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("statics", &self.statics.len())
            .field("pipelines", &self.pipelines)
            .finish()
    }
}
