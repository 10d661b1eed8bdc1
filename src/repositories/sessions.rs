use crate::common::redis_pool::RedisPool;
use crate::entities::sessions::Session;
use crate::repositories::streams;
use redis::AsyncCommands;
use std::ops::DerefMut;
use std::time::Duration;
use uuid::Uuid;

fn make_user_id_key(user_id: i64) -> String {
    format!("chat:sessions:user_ids:{user_id}")
}

/// Registers a new session for `user_id`, replacing any previous one.
pub async fn create(redis: &RedisPool, user_id: i64, ttl: Duration) -> anyhow::Result<Session> {
    let previous = fetch_one_by_user_id(redis, user_id).await?;
    let session = Session {
        session_id: Uuid::new_v4(),
        user_id,
    };

    let mut conn = redis.get().await?;
    let user_id_key = make_user_id_key(user_id);
    let mut pipe = redis::pipe();
    pipe.atomic()
        .set_ex(&user_id_key, session.session_id, ttl.as_secs())
        .ignore();
    if let Some(previous) = previous {
        pipe.del(streams::make_key(previous.session_id))
            .ignore()
            .del(streams::make_offset_key(previous.session_id))
            .ignore();
    }
    pipe.exec_async(conn.deref_mut()).await?;
    Ok(session)
}

pub async fn fetch_one_by_user_id(
    redis: &RedisPool,
    user_id: i64,
) -> anyhow::Result<Option<Session>> {
    let mut conn = redis.get().await?;
    let user_id_key = make_user_id_key(user_id);
    let session_id: Option<Uuid> = conn.get(user_id_key).await?;
    Ok(session_id.map(|session_id| Session {
        session_id,
        user_id,
    }))
}

/// Keeps the session reachable for another `ttl`.
pub async fn extend(redis: &RedisPool, session: &Session, ttl: Duration) -> anyhow::Result<()> {
    let mut conn = redis.get().await?;
    let user_id_key = make_user_id_key(session.user_id);
    let _: bool = conn.expire(user_id_key, ttl.as_secs() as i64).await?;
    Ok(())
}

pub async fn delete(redis: &RedisPool, session: &Session) -> anyhow::Result<()> {
    let mut conn = redis.get().await?;
    let user_id_key = make_user_id_key(session.user_id);
    redis::pipe()
        .atomic()
        .del(user_id_key)
        .ignore()
        .del(streams::make_key(session.session_id))
        .ignore()
        .del(streams::make_offset_key(session.session_id))
        .ignore()
        .exec_async(conn.deref_mut())
        .await?;
    Ok(())
}
