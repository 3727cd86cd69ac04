//! WebSocket transport and connected-client registry.
//!
//! Clients connect to `/ws` and receive server-pushed messages only; inbound
//! frames are drained and discarded. Each connection gets an unbounded
//! channel so a slow client cannot stall the broadcaster.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::main_lib::AppState;

#[derive(Default)]
pub struct ConnectionRegistry {
    next_id: AtomicU64,
    clients: Mutex<HashMap<u64, mpsc::UnboundedSender<String>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_client(&self) -> (u64, mpsc::UnboundedReceiver<String>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.clients
            .lock()
            .expect("client registry lock poisoned")
            .insert(id, tx);
        (id, rx)
    }

    pub fn remove_client(&self, id: u64) {
        self.clients
            .lock()
            .expect("client registry lock poisoned")
            .remove(&id);
    }

    /// Send `message` to every connected client, returning the number of
    /// clients reached. Clients whose channel has closed are skipped; their
    /// socket task removes them on exit.
    pub fn broadcast(&self, message: &str) -> usize {
        let clients = self
            .clients
            .lock()
            .expect("client registry lock poisoned");
        let mut delivered = 0;
        for tx in clients.values() {
            if tx.send(message.to_string()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    pub fn client_count(&self) -> usize {
        self.clients
            .lock()
            .expect("client registry lock poisoned")
            .len()
    }
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.registry.clone()))
}

async fn handle_socket(socket: WebSocket, registry: Arc<ConnectionRegistry>) {
    let (id, mut rx) = registry.add_client();
    tracing::debug!(client_id = id, "WebSocket client connected");

    let (mut sender, mut receiver) = socket.split();
    loop {
        tokio::select! {
            outbound = rx.recv() => {
                match outbound {
                    Some(message) => {
                        if sender.send(Message::Text(message.into())).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            inbound = receiver.next() => {
                match inbound {
                    // Inbound frames are ignored; the transport is one-way.
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    registry.remove_client(id);
    tracing::debug!(client_id = id, "WebSocket client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn broadcast_reaches_all_registered_clients() {
        let registry = ConnectionRegistry::new();
        let (_id_a, mut rx_a) = registry.add_client();
        let (_id_b, mut rx_b) = registry.add_client();

        let delivered = registry.broadcast("hello");
        assert_eq!(delivered, 2);
        assert_eq!(rx_a.recv().await.as_deref(), Some("hello"));
        assert_eq!(rx_b.recv().await.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn removed_clients_no_longer_receive_broadcasts() {
        let registry = ConnectionRegistry::new();
        let (id_a, mut rx_a) = registry.add_client();
        let (_id_b, mut rx_b) = registry.add_client();

        registry.remove_client(id_a);
        assert_eq!(registry.client_count(), 1);

        let delivered = registry.broadcast("update");
        assert_eq!(delivered, 1);
        assert_eq!(rx_b.recv().await.as_deref(), Some("update"));
        assert!(rx_a.recv().await.is_none());
    }
}
