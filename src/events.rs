use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

/// Notification payloads emitted by store mutations. Delivery is a
/// fire-and-forget broadcast; consumers that fall behind miss events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    PlaceApproved {
        place_id: Uuid,
    },
    PlaceRejected {
        place_id: Uuid,
        reason: Option<String>,
    },
    NewComment {
        place_id: Uuid,
        comment_id: Uuid,
    },
    CommentReply {
        place_id: Uuid,
        comment_id: Uuid,
    },
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Notification>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event. A send error only means nobody is subscribed,
    /// which is not a failure for a broadcast bus.
    pub fn publish(&self, event: Notification) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Background consumer that logs every notification. Nothing else is wired
/// to the bus yet; push delivery belongs to an external collaborator.
pub fn spawn_logger(bus: &EventBus) -> tokio::task::JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => info!(?event, "notification"),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "notification logger lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let place_id = Uuid::new_v4();
        bus.publish(Notification::PlaceApproved { place_id });
        assert_eq!(
            rx.recv().await.expect("event delivered"),
            Notification::PlaceApproved { place_id }
        );
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = EventBus::default();
        bus.publish(Notification::NewComment {
            place_id: Uuid::new_v4(),
            comment_id: Uuid::new_v4(),
        });
    }

    #[test]
    fn events_serialize_with_snake_case_type_tag() {
        let event = Notification::PlaceRejected {
            place_id: Uuid::nil(),
            reason: Some("duplicate listing".into()),
        };
        let json = serde_json::to_value(&event).expect("serializable");
        assert_eq!(json["type"], "place_rejected");
        assert_eq!(json["reason"], "duplicate listing");
    }
}
