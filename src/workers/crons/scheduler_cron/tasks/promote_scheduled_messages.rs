use crate::common::context::Context;
use crate::common::error::ServiceResult;
use crate::usecases::scheduler;
use chrono::Utc;
use tracing::info;

const BATCH_SIZE: u32 = 100;

pub async fn promote_scheduled_messages<C: Context>(ctx: &C) -> ServiceResult<usize> {
    let promoted = scheduler::poll_and_promote(ctx, Utc::now(), BATCH_SIZE).await?;
    if !promoted.is_empty() {
        info!(count = promoted.len(), "Promoted scheduled messages");
    }
    Ok(promoted.len())
}
