use crate::common::context::Context;
use crate::entities::messages::{CreateMessageArgs, Message, UnreadCount};
use crate::repositories::users;
use chrono::Utc;
use sqlx::SqliteExecutor;

const READ_FIELDS: &str = "id, sender_id, receiver_id, text, image, read, created_at";

/// Inserts a new unread message. `created_at` is assigned here, at persistence time.
/// Takes any executor so promotion can run it inside its claim transaction.
pub async fn create<'e, E: SqliteExecutor<'e>>(
    executor: E,
    args: CreateMessageArgs<'_>,
) -> sqlx::Result<Message> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO messages (sender_id, receiver_id, text, image, read, created_at) ",
        "VALUES (?, ?, ?, ?, FALSE, ?) RETURNING ",
        READ_FIELDS
    );
    sqlx::query_as(QUERY)
        .bind(args.sender_id)
        .bind(args.receiver_id)
        .bind(args.text)
        .bind(args.image)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
}

/// Inserts the message and records both participants as known users, atomically.
pub async fn create_with_participants<C: Context>(
    ctx: &C,
    args: CreateMessageArgs<'_>,
) -> sqlx::Result<Message> {
    let mut tx = ctx.db().begin().await?;
    users::ensure_known(&mut *tx, [args.sender_id, args.receiver_id]).await?;
    let message = create(&mut *tx, args).await?;
    tx.commit().await?;
    Ok(message)
}

pub async fn fetch_thread<C: Context>(
    ctx: &C,
    user_a: i64,
    user_b: i64,
) -> sqlx::Result<Vec<Message>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM messages ",
        "WHERE (sender_id = ? AND receiver_id = ?) OR (sender_id = ? AND receiver_id = ?) ",
        "ORDER BY created_at ASC, id ASC"
    );
    sqlx::query_as(QUERY)
        .bind(user_a)
        .bind(user_b)
        .bind(user_b)
        .bind(user_a)
        .fetch_all(ctx.db())
        .await
}

pub async fn unread_count<C: Context>(
    ctx: &C,
    sender_id: i64,
    receiver_id: i64,
) -> sqlx::Result<i64> {
    const QUERY: &str = const_str::concat!(
        "SELECT COUNT(*) FROM messages ",
        "WHERE sender_id = ? AND receiver_id = ? AND read IS FALSE"
    );
    sqlx::query_scalar(QUERY)
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(ctx.db())
        .await
}

/// Unread counts towards `receiver_id`, grouped by sender. Senders with nothing unread are absent.
pub async fn unread_counts<C: Context>(
    ctx: &C,
    receiver_id: i64,
) -> sqlx::Result<Vec<UnreadCount>> {
    const QUERY: &str = const_str::concat!(
        "SELECT sender_id, COUNT(*) AS unread_count FROM messages ",
        "WHERE receiver_id = ? AND read IS FALSE ",
        "GROUP BY sender_id"
    );
    sqlx::query_as(QUERY)
        .bind(receiver_id)
        .fetch_all(ctx.db())
        .await
}

/// Single UPDATE statement, so concurrent inserts either land before it and get
/// marked, or after it and stay unread.
pub async fn mark_all_read<C: Context>(
    ctx: &C,
    sender_id: i64,
    receiver_id: i64,
) -> sqlx::Result<u64> {
    const QUERY: &str = const_str::concat!(
        "UPDATE messages SET read = TRUE ",
        "WHERE sender_id = ? AND receiver_id = ? AND read IS FALSE"
    );
    let result = sqlx::query(QUERY)
        .bind(sender_id)
        .bind(receiver_id)
        .execute(ctx.db())
        .await?;
    Ok(result.rows_affected())
}
