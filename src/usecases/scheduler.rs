use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, store_unavailable};
use crate::entities::scheduled_messages::CreateScheduledMessageArgs;
use crate::models::messages::{Message, MessageContent};
use crate::models::scheduled_messages::ScheduledMessage;
use crate::repositories::{scheduled_messages, users};
use crate::usecases::delivery;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

/// Stores a pending entry. A trigger time in the past is accepted and simply
/// becomes due on the next poll.
pub async fn schedule<C: Context>(
    ctx: &C,
    sender_id: i64,
    receiver_id: i64,
    content: MessageContent<'_>,
    scheduled_time: DateTime<Utc>,
) -> ServiceResult<ScheduledMessage> {
    content.validate(ctx.message_policy())?;
    if let Err(e) = users::ensure_known(ctx.db(), [sender_id, receiver_id]).await {
        return store_unavailable(e);
    }
    let args = CreateScheduledMessageArgs {
        sender_id,
        receiver_id,
        text: content.text,
        image: content.image,
        scheduled_time,
    };
    match scheduled_messages::create(ctx, args).await {
        Ok(scheduled_message) => {
            info!(
                scheduled_message_id = scheduled_message.id,
                sender_id,
                receiver_id,
                scheduled_time = scheduled_time.to_rfc3339(),
                "Scheduled message"
            );
            Ok(ScheduledMessage::from(scheduled_message))
        }
        Err(e) => store_unavailable(e),
    }
}

/// Promotes every pending entry due at `now` into a live message and dispatches it.
///
/// Safe to run concurrently: each entry is claimed atomically, so whichever
/// poller claims it first is the only one to append its message. Entries that
/// fail to promote stay pending for the next poll; if a whole batch fails the
/// sweep reports the store as unavailable.
pub async fn poll_and_promote<C: Context>(
    ctx: &C,
    now: DateTime<Utc>,
    batch_size: u32,
) -> ServiceResult<Vec<Message>> {
    let mut promoted = vec![];
    loop {
        let due = match scheduled_messages::fetch_due(ctx, now, batch_size).await {
            Ok(due) => due,
            Err(e) => return store_unavailable(e),
        };
        let batch_len = due.len();
        let mut progressed = false;
        for entry in due {
            match scheduled_messages::promote(ctx, entry.id).await {
                Ok(Some((scheduled_message, message))) => {
                    progressed = true;
                    let message = Message::from(message);
                    info!(
                        scheduled_message_id = scheduled_message.id,
                        message_id = message.id,
                        "Promoted scheduled message"
                    );
                    delivery::dispatch(ctx, &message).await;
                    promoted.push(message);
                }
                Ok(None) => {
                    progressed = true;
                    debug!(
                        scheduled_message_id = entry.id,
                        "Scheduled message was claimed elsewhere"
                    );
                }
                Err(e) => error!(
                    scheduled_message_id = entry.id,
                    "Failed to promote scheduled message: {e:?}"
                ),
            }
        }
        if !progressed && batch_len > 0 {
            // every due entry failed; they stay pending for the next sweep
            error!(failed = batch_len, "No scheduled message could be promoted");
            return Err(AppError::StoreUnavailable);
        }
        if batch_len == 0 || batch_len < batch_size as usize {
            break;
        }
    }
    Ok(promoted)
}

pub async fn list_pending<C: Context>(
    ctx: &C,
    sender_id: i64,
) -> ServiceResult<Vec<ScheduledMessage>> {
    match scheduled_messages::fetch_pending_by_sender(ctx, sender_id).await {
        Ok(entries) => Ok(entries.into_iter().map(ScheduledMessage::from).collect()),
        Err(e) => store_unavailable(e),
    }
}

/// Cancels one of the sender's own pending entries.
pub async fn cancel<C: Context>(
    ctx: &C,
    sender_id: i64,
    scheduled_message_id: i64,
) -> ServiceResult<ScheduledMessage> {
    match scheduled_messages::cancel(ctx, scheduled_message_id, sender_id).await {
        Ok(Some(cancelled)) => {
            info!(scheduled_message_id, sender_id, "Cancelled scheduled message");
            Ok(ScheduledMessage::from(cancelled))
        }
        Ok(None) => match scheduled_messages::fetch_one(ctx, scheduled_message_id).await {
            Ok(Some(entry)) if entry.sender_id == sender_id => {
                Err(AppError::ScheduledMessagesNotPending)
            }
            Ok(_) => Err(AppError::ScheduledMessagesNotFound),
            Err(e) => store_unavailable(e),
        },
        Err(e) => store_unavailable(e),
    }
}
