//! Real-time fan-out of note changes to connected browsers.
//!
//! Every live connection registers with the [`Broadcaster`] and receives each
//! published [`NoteEvent`] on its own channel. Delivery is best-effort: there
//! is no acknowledgment, no replay for late joiners and no initial state push.

pub mod ws;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::entity::NoteDone;

/// Identifier of one registered client connection.
pub type ClientId = u64;

/// Events pushed to real-time clients.
///
/// Serialized as `{"event": "note_updated", "data": {"id": 3, "done": true}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum NoteEvent {
    NoteUpdated(NoteDone),
}

impl NoteEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NoteEvent::NoteUpdated(_) => "note_updated",
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    clients: HashMap<ClientId, UnboundedSender<NoteEvent>>,
    next_id: ClientId,
}

/// Process-wide registration table of connected clients.
#[derive(Debug, Clone, Default)]
pub struct Broadcaster {
    registry: Arc<Mutex<Registry>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a new client. It stays registered until the returned
    /// subscription is dropped.
    pub fn register(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut registry = self.registry();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.clients.insert(id, tx);
        debug!(client_id = id, clients = registry.clients.len(), "Client registered");

        Subscription {
            id,
            rx,
            broadcaster: self.clone(),
        }
    }

    fn deregister(&self, id: ClientId) -> bool {
        let mut registry = self.registry();
        let removed = registry.clients.remove(&id).is_some();
        if removed {
            debug!(client_id = id, clients = registry.clients.len(), "Client deregistered");
        }
        removed
    }

    /// Send an event to every registered client.
    ///
    /// Returns the number of clients the event was handed to. Clients whose
    /// receiving side is gone are pruned. With no clients this is a no-op.
    pub fn publish(&self, event: NoteEvent) -> usize {
        let mut registry = self.registry();
        registry.clients.retain(|_, tx| tx.send(event).is_ok());
        let delivered = registry.clients.len();
        debug!(event = event.name(), delivered, "Published event");
        delivered
    }

    pub fn client_count(&self) -> usize {
        self.registry().clients.len()
    }
}

/// A registered client's view of the event stream.
#[derive(Debug)]
pub struct Subscription {
    id: ClientId,
    rx: UnboundedReceiver<NoteEvent>,
    broadcaster: Broadcaster,
}

impl Subscription {
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Wait for the next event.
    pub async fn recv(&mut self) -> Option<NoteEvent> {
        self.rx.recv().await
    }

    /// Take an already delivered event without waiting.
    pub fn try_recv(&mut self) -> Option<NoteEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.broadcaster.deregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updated(id: i64, done: bool) -> NoteEvent {
        NoteEvent::NoteUpdated(NoteDone { id, done })
    }

    #[test]
    fn test_event_wire_shape() {
        let json = serde_json::to_value(updated(3, true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event": "note_updated", "data": {"id": 3, "done": true}})
        );
        assert_eq!(updated(3, true).name(), "note_updated");
    }

    #[test]
    fn test_publish_without_clients_is_noop() {
        let broadcaster = Broadcaster::new();
        assert_eq!(broadcaster.publish(updated(1, true)), 0);
        assert_eq!(broadcaster.client_count(), 0);
    }

    #[tokio::test]
    async fn test_publish_reaches_every_client() {
        let broadcaster = Broadcaster::new();
        let mut a = broadcaster.register();
        let mut b = broadcaster.register();
        assert_ne!(a.id(), b.id());
        assert_eq!(broadcaster.client_count(), 2);

        assert_eq!(broadcaster.publish(updated(7, true)), 2);

        assert_eq!(a.recv().await, Some(updated(7, true)));
        assert_eq!(b.recv().await, Some(updated(7, true)));
        assert!(a.try_recv().is_none());
        assert!(b.try_recv().is_none());
    }

    #[test]
    fn test_drop_deregisters() {
        let broadcaster = Broadcaster::new();
        let a = broadcaster.register();
        let b = broadcaster.register();
        drop(a);
        assert_eq!(broadcaster.client_count(), 1);
        drop(b);
        assert_eq!(broadcaster.client_count(), 0);
    }

    #[test]
    fn test_no_replay_for_late_clients() {
        let broadcaster = Broadcaster::new();
        broadcaster.publish(updated(1, true));

        let mut late = broadcaster.register();
        assert!(late.try_recv().is_none());
    }

    #[test]
    fn test_events_arrive_in_publish_order() {
        let broadcaster = Broadcaster::new();
        let mut sub = broadcaster.register();
        broadcaster.publish(updated(1, true));
        broadcaster.publish(updated(1, false));

        assert_eq!(sub.try_recv(), Some(updated(1, true)));
        assert_eq!(sub.try_recv(), Some(updated(1, false)));
        assert_eq!(sub.try_recv(), None);
    }
}
