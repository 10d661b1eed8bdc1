use crate::common::error::{AppError, ServiceResult};
use crate::entities::messages::Message as MessageEntity;
use crate::models::scheduled_messages::ScheduledMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: Option<String>,
    pub image: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MessageEntity> for Message {
    fn from(value: MessageEntity) -> Self {
        Self {
            id: value.id,
            sender_id: value.sender_id,
            receiver_id: value.receiver_id,
            text: value.text,
            image: value.image,
            read: value.read,
            created_at: value.created_at,
        }
    }
}

/// How strictly outgoing message content is checked.
/// The default accepts empty messages of any length.
#[derive(Copy, Clone, Debug, Default)]
pub struct MessagePolicy {
    pub require_content: bool,
    pub max_length: Option<usize>,
}

/// Text and image reference of a message that is about to be stored.
#[derive(Copy, Clone, Debug, Default)]
pub struct MessageContent<'a> {
    pub text: Option<&'a str>,
    pub image: Option<&'a str>,
}

impl MessageContent<'_> {
    pub fn is_empty(&self) -> bool {
        self.text.is_none_or(str::is_empty) && self.image.is_none_or(str::is_empty)
    }

    pub fn validate(&self, policy: MessagePolicy) -> ServiceResult<()> {
        if policy.require_content && self.is_empty() {
            return Err(AppError::MessagesEmpty);
        }
        if let (Some(max_length), Some(text)) = (policy.max_length, self.text) {
            if text.chars().count() > max_length {
                return Err(AppError::MessagesTooLong);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageArgs {
    pub text: Option<String>,
    /// Raw image payload (data URI or base64), uploaded before the message is stored.
    pub image: Option<String>,
    pub scheduled_time: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub enum SendOutcome {
    Sent(Message),
    Scheduled(ScheduledMessage),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledResponse {
    pub message: &'static str,
    pub scheduled_message: ScheduledMessage,
}

#[derive(Serialize)]
pub struct ConfirmationResponse {
    pub message: &'static str,
}
