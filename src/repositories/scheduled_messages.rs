use crate::common::context::Context;
use crate::entities::messages::{CreateMessageArgs, Message};
use crate::entities::scheduled_messages::{CreateScheduledMessageArgs, ScheduledMessage};
use crate::models::scheduled_messages::ScheduledMessageStatus;
use crate::repositories::messages;
use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

const READ_FIELDS: &str = "id, sender_id, receiver_id, text, image, scheduled_time, \
    status, message_id, created_at, updated_at";

pub async fn create<C: Context>(
    ctx: &C,
    args: CreateScheduledMessageArgs<'_>,
) -> sqlx::Result<ScheduledMessage> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO scheduled_messages ",
        "(sender_id, receiver_id, text, image, scheduled_time, status, created_at, updated_at) ",
        "VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING ",
        READ_FIELDS
    );
    let now = Utc::now();
    sqlx::query_as(QUERY)
        .bind(args.sender_id)
        .bind(args.receiver_id)
        .bind(args.text)
        .bind(args.image)
        .bind(args.scheduled_time)
        .bind(ScheduledMessageStatus::Pending.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(ctx.db())
        .await
}

pub async fn fetch_one<C: Context>(
    ctx: &C,
    scheduled_message_id: i64,
) -> sqlx::Result<Option<ScheduledMessage>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM scheduled_messages WHERE id = ?"
    );
    sqlx::query_as(QUERY)
        .bind(scheduled_message_id)
        .fetch_optional(ctx.db())
        .await
}

/// Pending entries whose trigger time is at or before `now`, oldest trigger first.
pub async fn fetch_due<C: Context>(
    ctx: &C,
    now: DateTime<Utc>,
    limit: u32,
) -> sqlx::Result<Vec<ScheduledMessage>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM scheduled_messages ",
        "WHERE status = ? AND scheduled_time <= ? ",
        "ORDER BY scheduled_time ASC, id ASC LIMIT ?"
    );
    sqlx::query_as(QUERY)
        .bind(ScheduledMessageStatus::Pending.as_str())
        .bind(now)
        .bind(limit)
        .fetch_all(ctx.db())
        .await
}

pub async fn fetch_pending_by_sender<C: Context>(
    ctx: &C,
    sender_id: i64,
) -> sqlx::Result<Vec<ScheduledMessage>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM scheduled_messages ",
        "WHERE sender_id = ? AND status = ? ",
        "ORDER BY scheduled_time ASC, id ASC"
    );
    sqlx::query_as(QUERY)
        .bind(sender_id)
        .bind(ScheduledMessageStatus::Pending.as_str())
        .fetch_all(ctx.db())
        .await
}

/// Moves a pending entry into `status`. Returns `None` when the entry is no longer
/// pending (another poller or a cancellation got there first).
async fn transition<'e, E: SqliteExecutor<'e>>(
    executor: E,
    scheduled_message_id: i64,
    sender_id: Option<i64>,
    status: ScheduledMessageStatus,
) -> sqlx::Result<Option<ScheduledMessage>> {
    const QUERY: &str = const_str::concat!(
        "UPDATE scheduled_messages SET status = ?, updated_at = ? ",
        "WHERE id = ? AND status = ? AND (? IS NULL OR sender_id = ?) RETURNING ",
        READ_FIELDS
    );
    sqlx::query_as(QUERY)
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(scheduled_message_id)
        .bind(ScheduledMessageStatus::Pending.as_str())
        .bind(sender_id)
        .bind(sender_id)
        .fetch_optional(executor)
        .await
}

/// Claims the entry and appends its message in one transaction: either the entry
/// ends up promoted with exactly one message, or nothing changes.
pub async fn promote<C: Context>(
    ctx: &C,
    scheduled_message_id: i64,
) -> sqlx::Result<Option<(ScheduledMessage, Message)>> {
    const LINK_QUERY: &str = "UPDATE scheduled_messages SET message_id = ? WHERE id = ?";

    let mut tx = ctx.db().begin().await?;
    let claimed = transition(
        &mut *tx,
        scheduled_message_id,
        None,
        ScheduledMessageStatus::Promoted,
    )
    .await?;
    let Some(mut scheduled_message) = claimed else {
        tx.rollback().await?;
        return Ok(None);
    };

    let message = messages::create(
        &mut *tx,
        CreateMessageArgs {
            sender_id: scheduled_message.sender_id,
            receiver_id: scheduled_message.receiver_id,
            text: scheduled_message.text.as_deref(),
            image: scheduled_message.image.as_deref(),
        },
    )
    .await?;
    sqlx::query(LINK_QUERY)
        .bind(message.id)
        .bind(scheduled_message.id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    scheduled_message.message_id = Some(message.id);
    Ok(Some((scheduled_message, message)))
}

pub async fn cancel<C: Context>(
    ctx: &C,
    scheduled_message_id: i64,
    sender_id: i64,
) -> sqlx::Result<Option<ScheduledMessage>> {
    transition(
        ctx.db(),
        scheduled_message_id,
        Some(sender_id),
        ScheduledMessageStatus::Cancelled,
    )
    .await
}
