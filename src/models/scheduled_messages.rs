use crate::entities::scheduled_messages::ScheduledMessage as ScheduledMessageEntity;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduledMessageStatus {
    Pending,
    Promoted,
    Cancelled,
}

impl ScheduledMessageStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScheduledMessageStatus::Pending => "pending",
            ScheduledMessageStatus::Promoted => "promoted",
            ScheduledMessageStatus::Cancelled => "cancelled",
        }
    }
}

impl From<String> for ScheduledMessageStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "promoted" => ScheduledMessageStatus::Promoted,
            "cancelled" => ScheduledMessageStatus::Cancelled,
            _ => ScheduledMessageStatus::Pending,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMessage {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: Option<String>,
    pub image: Option<String>,
    pub scheduled_time: DateTime<Utc>,
    pub status: ScheduledMessageStatus,
    /// The live message this entry was promoted into.
    pub message_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<ScheduledMessageEntity> for ScheduledMessage {
    fn from(value: ScheduledMessageEntity) -> Self {
        Self {
            id: value.id,
            sender_id: value.sender_id,
            receiver_id: value.receiver_id,
            text: value.text,
            image: value.image,
            scheduled_time: value.scheduled_time,
            status: ScheduledMessageStatus::from(value.status),
            message_id: value.message_id,
            created_at: value.created_at,
        }
    }
}
