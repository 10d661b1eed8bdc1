use crate::common::redis_pool::RedisPool;
use crate::entities::streams::{StreamEvent, StreamReadEvent, StreamReadReply};
use redis::AsyncCommands;
use redis::streams::StreamMaxlen;
use std::ops::DerefMut;
use std::time::Duration;
use uuid::Uuid;

const BASE_KEY: &str = "chat:streams";
/// Older events are trimmed once a session's stream grows past this.
const MAX_PENDING_EVENTS: usize = 1000;

pub fn make_key(session_id: Uuid) -> String {
    format!("{BASE_KEY}:user:{session_id}")
}

pub fn make_offset_key(session_id: Uuid) -> String {
    format!("chat:sessions:{session_id}:stream_offset")
}

pub async fn push_event(
    redis: &RedisPool,
    session_id: Uuid,
    event: &str,
    payload: &serde_json::Value,
    ttl: Duration,
) -> anyhow::Result<()> {
    let mut conn = redis.get().await?;
    let key = make_key(session_id);
    let entry = StreamEvent::new(event, payload);
    redis::pipe()
        .xadd_maxlen(
            &key,
            StreamMaxlen::Approx(MAX_PENDING_EVENTS),
            "*",
            &entry.items(),
        )
        .ignore()
        .expire(&key, ttl.as_secs() as i64)
        .ignore()
        .exec_async(conn.deref_mut())
        .await?;
    Ok(())
}

/// Reads everything pushed since the last read and advances the session's offset.
pub async fn read_pending_events(
    redis: &RedisPool,
    session_id: Uuid,
) -> anyhow::Result<Vec<StreamReadEvent>> {
    let mut conn = redis.get().await?;
    let key = make_key(session_id);
    let offset_key = make_offset_key(session_id);
    let offset: Option<String> = conn.get(&offset_key).await?;
    let offset = offset.unwrap_or_else(|| "0-0".to_string());

    let reply: Option<StreamReadReply> = conn.xread(&[&key], &[&offset]).await?;
    let events: Vec<StreamReadEvent> = match reply {
        None => vec![],
        Some(reply) => reply
            .streams
            .into_iter()
            .flat_map(|stream| stream.events)
            .collect(),
    };

    if let Some(last) = events.last() {
        let _: () = conn.set(&offset_key, &last.event_id).await?;
    }
    Ok(events)
}
