//! Subscription Token: the shared liveness cell.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::ids::ConnectionId;

/// One liveness flag, owned (via `Arc`) by the subscription record and
/// observed (via `Weak`) by every issued [`Connection`](super::Connection).
///
/// The flag only ever goes from alive to dead.
#[derive(Debug)]
pub struct ConnectionNode {
    id: ConnectionId,
    alive: AtomicBool,
}

impl ConnectionNode {
    pub fn new() -> Self {
        Self {
            id: ConnectionId::generate(),
            alive: AtomicBool::new(true),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Mark the token dead. Returns `true` if this call performed the transition.
    pub fn disconnect(&self) -> bool {
        self.alive.swap(false, Ordering::AcqRel)
    }

    pub fn is_connected(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

impl Default for ConnectionNode {
    fn default() -> Self {
        Self::new()
    }
}
