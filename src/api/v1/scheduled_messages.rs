use crate::api::RequestContext;
use crate::api::v1::decoded;
use crate::common::error::ServiceResponse;
use crate::models::scheduled_messages::ScheduledMessage;
use crate::usecases::scheduler;
use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::PathRejection;

pub async fn list_pending(ctx: RequestContext) -> ServiceResponse<Vec<ScheduledMessage>> {
    let pending = scheduler::list_pending(&ctx, ctx.identity.user_id).await?;
    Ok(Json(pending))
}

pub async fn cancel(
    ctx: RequestContext,
    scheduled_message_id: Result<Path<i64>, PathRejection>,
) -> ServiceResponse<ScheduledMessage> {
    let Path(scheduled_message_id) = decoded(scheduled_message_id)?;
    let cancelled = scheduler::cancel(&ctx, ctx.identity.user_id, scheduled_message_id).await?;
    Ok(Json(cancelled))
}
