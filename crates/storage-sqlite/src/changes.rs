//! SQLite change feed.
//!
//! SQLite has no cross-connection notification mechanism, so the
//! repositories publish a notification here right after their write
//! transaction commits. Consumers only see the `ChangeFeed` trait; where the
//! stream comes from stays a storage detail.

use tokio::sync::broadcast;

use leadhub_core::changes::{ChangeFeed, ChangeNotification};

pub struct SqliteChangeFeed {
    sender: broadcast::Sender<ChangeNotification>,
}

impl SqliteChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a committed row change. Lagging or absent listeners are
    /// ignored to avoid blocking writers.
    pub fn publish(&self, notification: ChangeNotification) {
        let _ = self.sender.send(notification);
    }
}

impl ChangeFeed for SqliteChangeFeed {
    fn subscribe(&self) -> broadcast::Receiver<ChangeNotification> {
        self.sender.subscribe()
    }
}
