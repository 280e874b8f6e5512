use std::sync::{Arc, Weak};

use crate::ids::ConnectionId;

use super::ConnectionNode;

/// Non-owning handle to a subscription's liveness.
///
/// Holds a `Weak` reference, so it never extends the token's lifetime. Once
/// the owning record is gone the handle observes "disconnected" instead of
/// failing.
#[derive(Debug, Clone, Default)]
pub struct Connection {
    node: Weak<ConnectionNode>,
}

impl Connection {
    pub(crate) fn new(node: &Arc<ConnectionNode>) -> Self {
        Self {
            node: Arc::downgrade(node),
        }
    }

    /// Mark the subscription dead. Idempotent; a no-op if the token no longer exists.
    pub fn disconnect(&self) {
        if let Some(node) = self.node.upgrade()
            && node.disconnect()
        {
            tracing::trace!(connection = %node.id(), "disconnected");
        }
    }

    /// `false` once disconnected or once the token has been destroyed.
    pub fn is_connected(&self) -> bool {
        self.node
            .upgrade()
            .is_some_and(|node| node.is_connected())
    }

    /// Id of the underlying token, while it still exists.
    pub fn id(&self) -> Option<ConnectionId> {
        self.node.upgrade().map(|node| node.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_handle_is_never_connected() {
        let conn = Connection::default();
        assert!(!conn.is_connected());
        assert!(conn.id().is_none());
        conn.disconnect();
    }

    #[test]
    fn disconnect_is_visible_through_every_clone() {
        let node = Arc::new(ConnectionNode::new());
        let a = Connection::new(&node);
        let b = a.clone();

        assert!(b.is_connected());
        a.disconnect();
        assert!(!a.is_connected());
        assert!(!b.is_connected());
        assert!(!node.is_connected());
    }

    #[test]
    fn handle_outlives_the_token() {
        let node = Arc::new(ConnectionNode::new());
        let id = node.id();
        let conn = Connection::new(&node);
        assert_eq!(conn.id(), Some(id));

        drop(node);
        assert!(!conn.is_connected());
        assert_eq!(conn.id(), None);
        conn.disconnect();
    }

    #[test]
    fn handle_does_not_keep_the_token_alive() {
        let node = Arc::new(ConnectionNode::new());
        let _conn = Connection::new(&node);
        assert_eq!(Arc::strong_count(&node), 1);
    }

    #[test]
    fn concurrent_disconnect_and_query() {
        let node = Arc::new(ConnectionNode::new());
        let conn = Connection::new(&node);

        let workers: Vec<_> = (0..4)
            .map(|i| {
                let conn = conn.clone();
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        let _ = conn.is_connected();
                    }
                    if i == 0 {
                        conn.disconnect();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert!(!conn.is_connected());
    }
}
