use crate::api::RequestContext;
use crate::api::v1::decoded;
use crate::common::error::{ServiceResponse, ServiceResult};
use crate::models::messages::{
    ConfirmationResponse, Message, ScheduledResponse, SendMessageArgs, SendOutcome,
};
use crate::models::summaries::{SummarizeArgs, SummaryResponse};
use crate::models::users::Peer;
use crate::usecases::{conversations, messages, summaries};
use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub async fn list_users(ctx: RequestContext) -> ServiceResponse<Vec<Peer>> {
    let peers = conversations::list_peers(&ctx, ctx.identity.user_id).await?;
    Ok(Json(peers))
}

pub async fn list_thread(
    ctx: RequestContext,
    peer_id: Result<Path<i64>, PathRejection>,
) -> ServiceResponse<Vec<Message>> {
    let Path(peer_id) = decoded(peer_id)?;
    let messages = conversations::list_messages(&ctx, ctx.identity.user_id, peer_id).await?;
    Ok(Json(messages))
}

pub async fn send(
    ctx: RequestContext,
    receiver_id: Result<Path<i64>, PathRejection>,
    args: Result<Json<SendMessageArgs>, JsonRejection>,
) -> ServiceResult<Response> {
    let Path(receiver_id) = decoded(receiver_id)?;
    let Json(args) = decoded(args)?;
    let outcome = messages::send(&ctx, ctx.identity.user_id, receiver_id, args).await?;
    let response = match outcome {
        SendOutcome::Sent(message) => (StatusCode::CREATED, Json(message)).into_response(),
        SendOutcome::Scheduled(scheduled_message) => {
            let body = ScheduledResponse {
                message: "Message scheduled successfully",
                scheduled_message,
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
    };
    Ok(response)
}

/// Marks messages sent by `{id}` to the caller as read.
pub async fn mark_read(
    ctx: RequestContext,
    sender_id: Result<Path<i64>, PathRejection>,
) -> ServiceResponse<ConfirmationResponse> {
    let Path(sender_id) = decoded(sender_id)?;
    messages::mark_thread_read(&ctx, sender_id, ctx.identity.user_id).await?;
    Ok(Json(ConfirmationResponse {
        message: "Messages marked as read.",
    }))
}

pub async fn summarize(
    ctx: RequestContext,
    args: Result<Json<SummarizeArgs>, JsonRejection>,
) -> ServiceResponse<SummaryResponse> {
    let Json(args) = decoded(args)?;
    let summary = summaries::summarize(&ctx, args.messages).await?;
    Ok(Json(SummaryResponse { summary }))
}
