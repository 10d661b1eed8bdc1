use chrono::{DateTime, Utc};

#[derive(Debug, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: Option<String>,
    pub image: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

pub struct CreateMessageArgs<'a> {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub text: Option<&'a str>,
    pub image: Option<&'a str>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct UnreadCount {
    pub sender_id: i64,
    pub unread_count: i64,
}
