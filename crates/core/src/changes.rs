//! Row-change feed abstraction.
//!
//! The store emits a [`ChangeNotification`] for every committed row change on
//! the leads table. Consumers subscribe once and receive the stream through a
//! broadcast receiver; which store produces the notifications is an
//! implementation detail behind [`ChangeFeed`]. Notifications are transient:
//! consumed once, never queued, replayed, or persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;

/// Kind of row change, named after the store-side operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A single row-change notification from the store.
///
/// `new` carries the row state after an insert or update; `old` carries the
/// last known state for a delete, since there is no current row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub kind: ChangeKind,
    pub new: Option<Value>,
    pub old: Option<Value>,
}

impl ChangeNotification {
    pub fn insert(row: Value) -> Self {
        Self {
            kind: ChangeKind::Insert,
            new: Some(row),
            old: None,
        }
    }

    pub fn update(row: Value) -> Self {
        Self {
            kind: ChangeKind::Update,
            new: Some(row),
            old: None,
        }
    }

    pub fn delete(prior: Value) -> Self {
        Self {
            kind: ChangeKind::Delete,
            new: None,
            old: Some(prior),
        }
    }

    /// The row state to publish: the new state, or the prior state for
    /// deletes. `None` means the notification carried no usable payload.
    pub fn row_state(self) -> (ChangeKind, Option<Value>) {
        (self.kind, self.new.or(self.old))
    }
}

/// Subscription capability over the store's change stream.
pub trait ChangeFeed: Send + Sync {
    /// Subscribe to row changes on the leads table. Changes published before
    /// the subscription existed are not replayed.
    fn subscribe(&self) -> broadcast::Receiver<ChangeNotification>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_state_prefers_new_over_old() {
        let n = ChangeNotification {
            kind: ChangeKind::Update,
            new: Some(json!({"id": "a"})),
            old: Some(json!({"id": "stale"})),
        };
        let (kind, state) = n.row_state();
        assert_eq!(kind, ChangeKind::Update);
        assert_eq!(state.unwrap()["id"], "a");
    }

    #[test]
    fn delete_falls_back_to_prior_state() {
        let (kind, state) = ChangeNotification::delete(json!({"id": "gone"})).row_state();
        assert_eq!(kind, ChangeKind::Delete);
        assert_eq!(state.unwrap()["id"], "gone");
    }

    #[test]
    fn kind_serializes_as_store_event_names() {
        assert_eq!(serde_json::to_string(&ChangeKind::Insert).unwrap(), "\"INSERT\"");
        assert_eq!(serde_json::to_string(&ChangeKind::Delete).unwrap(), "\"DELETE\"");
    }
}
