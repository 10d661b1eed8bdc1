use crate::entities::streams::StreamReadEvent;
use serde::Serialize;

/// Pushed to the receiver's session when a message becomes live.
pub const NEW_MESSAGE: &str = "newMessage";

#[derive(Clone, Debug, Serialize)]
pub struct Event {
    pub id: String,
    pub event: String,
    pub payload: serde_json::Value,
}

impl From<StreamReadEvent> for Event {
    fn from(value: StreamReadEvent) -> Self {
        Self {
            id: value.event_id,
            event: value.event,
            payload: value.data,
        }
    }
}
