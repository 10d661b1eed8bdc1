use chrono::{DateTime, Utc};

#[derive(Debug, sqlx::FromRow)]
pub struct ScheduledMessage {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: Option<String>,
    pub image: Option<String>,
    pub scheduled_time: DateTime<Utc>,
    pub status: String,
    pub message_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct CreateScheduledMessageArgs<'a> {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: Option<&'a str>,
    pub image: Option<&'a str>,
    pub scheduled_time: DateTime<Utc>,
}
