//! Change feed subscriber bridging committed row changes to the realtime
//! transport. Runs for the lifetime of the process; a malformed notification
//! is logged and skipped, never fatal.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};

use leadhub_core::changes::{ChangeFeed, ChangeKind, ChangeNotification};

use crate::realtime::ConnectionRegistry;

const LEAD_REFRESH: &str = "lead:refresh";

#[derive(Serialize)]
struct LeadRefresh {
    #[serde(rename = "type")]
    message_type: &'static str,
    event: ChangeKind,
    data: Value,
}

pub fn spawn_change_subscriber(
    feed: Arc<dyn ChangeFeed>,
    registry: Arc<ConnectionRegistry>,
) -> JoinHandle<()> {
    // Subscribe before spawning so changes published immediately after this
    // call are not missed.
    let mut receiver = feed.subscribe();
    tokio::spawn(async move {
        tracing::info!("Subscribed to lead change feed");
        loop {
            match receiver.recv().await {
                Ok(notification) => handle_notification(notification, &registry),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Change subscriber lagged behind the feed");
                }
                Err(RecvError::Closed) => {
                    tracing::info!("Change feed closed, stopping subscriber");
                    break;
                }
            }
        }
    })
}

fn handle_notification(notification: ChangeNotification, registry: &ConnectionRegistry) {
    let (kind, row) = notification.row_state();
    let Some(data) = row else {
        tracing::error!(event = ?kind, "Change notification carried no row state, skipping");
        return;
    };

    let message = LeadRefresh {
        message_type: LEAD_REFRESH,
        event: kind,
        data,
    };
    match serde_json::to_string(&message) {
        Ok(payload) => {
            let delivered = registry.broadcast(&payload);
            tracing::debug!(event = ?kind, delivered, "Broadcast lead refresh");
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to serialize lead refresh message");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::broadcast;

    struct TestFeed {
        sender: broadcast::Sender<ChangeNotification>,
    }

    impl ChangeFeed for TestFeed {
        fn subscribe(&self) -> broadcast::Receiver<ChangeNotification> {
            self.sender.subscribe()
        }
    }

    fn test_feed() -> (Arc<TestFeed>, broadcast::Sender<ChangeNotification>) {
        let (sender, _) = broadcast::channel(16);
        (
            Arc::new(TestFeed {
                sender: sender.clone(),
            }),
            sender,
        )
    }

    async fn recv_with_timeout(rx: &mut tokio::sync::mpsc::UnboundedReceiver<String>) -> String {
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for broadcast")
            .expect("registry channel closed")
    }

    #[tokio::test]
    async fn malformed_notification_does_not_end_the_subscription() {
        let (feed, sender) = test_feed();
        let registry = Arc::new(ConnectionRegistry::new());
        let (_id, mut rx) = registry.add_client();

        let handle = spawn_change_subscriber(feed, registry.clone());

        // No row state at all: logged and skipped.
        sender
            .send(ChangeNotification {
                kind: ChangeKind::Update,
                new: None,
                old: None,
            })
            .unwrap();
        sender
            .send(ChangeNotification::insert(json!({"id": "l1"})))
            .unwrap();

        let payload = recv_with_timeout(&mut rx).await;
        let parsed: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(parsed["type"], "lead:refresh");
        assert_eq!(parsed["event"], "INSERT");
        assert_eq!(parsed["data"]["id"], "l1");

        handle.abort();
    }

    #[tokio::test]
    async fn delete_notifications_carry_the_prior_row_state() {
        let (feed, sender) = test_feed();
        let registry = Arc::new(ConnectionRegistry::new());
        let (_id, mut rx) = registry.add_client();

        let handle = spawn_change_subscriber(feed, registry.clone());

        sender
            .send(ChangeNotification::delete(json!({"id": "l9"})))
            .unwrap();

        let payload = recv_with_timeout(&mut rx).await;
        let parsed: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(parsed["event"], "DELETE");
        assert_eq!(parsed["data"]["id"], "l9");

        handle.abort();
    }
}
