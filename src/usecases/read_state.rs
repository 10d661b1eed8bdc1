use crate::common::context::Context;
use crate::common::error::{ServiceResult, store_unavailable};
use crate::repositories::messages;
use hashbrown::HashMap;
use tracing::info;

/// Messages from `peer_id` to `viewer_id` that the viewer has not read yet.
pub async fn unread_count<C: Context>(ctx: &C, peer_id: i64, viewer_id: i64) -> ServiceResult<u64> {
    match messages::unread_count(ctx, peer_id, viewer_id).await {
        Ok(count) => Ok(count.max(0) as u64),
        Err(e) => store_unavailable(e),
    }
}

/// Unread counts towards `viewer_id`, keyed by sender. Senders without unread
/// messages are absent.
pub async fn unread_counts<C: Context>(
    ctx: &C,
    viewer_id: i64,
) -> ServiceResult<HashMap<i64, u64>> {
    match messages::unread_counts(ctx, viewer_id).await {
        Ok(counts) => Ok(counts
            .into_iter()
            .map(|count| (count.sender_id, count.unread_count.max(0) as u64))
            .collect()),
        Err(e) => store_unavailable(e),
    }
}

/// Marks every unread message from `sender_id` to `receiver_id` as read.
/// Only that direction is touched; calling it again is a no-op.
pub async fn mark_all_read<C: Context>(
    ctx: &C,
    sender_id: i64,
    receiver_id: i64,
) -> ServiceResult<u64> {
    match messages::mark_all_read(ctx, sender_id, receiver_id).await {
        Ok(marked) => {
            info!(sender_id, receiver_id, marked, "Marked messages as read");
            Ok(marked)
        }
        Err(e) => store_unavailable(e),
    }
}
