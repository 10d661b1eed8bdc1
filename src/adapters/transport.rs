use crate::common::redis_pool::RedisPool;
use crate::repositories::{sessions, streams};
use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

/// The connection registry: who is reachable right now, and how to reach them.
/// Both operations are best effort; nothing is acknowledged by the recipient.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn reachable_session_for(&self, user_id: i64) -> anyhow::Result<Option<Uuid>>;

    async fn push(
        &self,
        session_id: Uuid,
        event: &str,
        payload: &serde_json::Value,
    ) -> anyhow::Result<()>;
}

/// Sessions live under a per-user key with a TTL; pushed events are appended to
/// the session's redis stream and drained by the client's next poll.
pub struct RedisTransport {
    redis: RedisPool,
    session_ttl: Duration,
}

impl RedisTransport {
    pub fn new(redis: RedisPool, session_ttl: Duration) -> Self {
        Self { redis, session_ttl }
    }
}

#[async_trait]
impl Transport for RedisTransport {
    async fn reachable_session_for(&self, user_id: i64) -> anyhow::Result<Option<Uuid>> {
        let session = sessions::fetch_one_by_user_id(&self.redis, user_id).await?;
        Ok(session.map(|session| session.session_id))
    }

    async fn push(
        &self,
        session_id: Uuid,
        event: &str,
        payload: &serde_json::Value,
    ) -> anyhow::Result<()> {
        streams::push_event(&self.redis, session_id, event, payload, self.session_ttl).await
    }
}
