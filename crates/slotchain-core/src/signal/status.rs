//! Serializable snapshot of a Signal's subscriptions.

use serde::{Deserialize, Serialize};

use crate::ids::SignalId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCounts {
    pub total: usize,
    pub live: usize,
}

impl SubscriptionCounts {
    /// Entries kept in place after being disconnected.
    pub fn dead(&self) -> usize {
        self.total - self.live
    }
}

/// Status view of one [`Signal`](super::Signal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalStatus {
    pub signal_id: SignalId,
    pub name: Option<String>,
    pub statics: SubscriptionCounts,
    pub pipelines: SubscriptionCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_is_total_minus_live() {
        let counts = SubscriptionCounts { total: 5, live: 3 };
        assert_eq!(counts.dead(), 2);
    }

    #[test]
    fn status_serializes_as_json() {
        let status = SignalStatus {
            signal_id: SignalId::generate(),
            name: Some("ticks".to_string()),
            statics: SubscriptionCounts { total: 2, live: 1 },
            pipelines: SubscriptionCounts::default(),
        };

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["name"], "ticks");
        assert_eq!(json["statics"]["live"], 1);
        assert_eq!(json["pipelines"]["total"], 0);

        let back: SignalStatus = serde_json::from_value(json).unwrap();
        assert_eq!(back, status);
    }
}
