use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, failure};
use crate::models::messages::{MessageContent, SendMessageArgs, SendOutcome};
use crate::usecases::{conversations, delivery, read_state, scheduler};

/// Sends a message now, or stages it when `scheduled_time` is given.
///
/// An attached image is uploaded first; if that fails nothing is stored.
pub async fn send<C: Context>(
    ctx: &C,
    sender_id: i64,
    receiver_id: i64,
    args: SendMessageArgs,
) -> ServiceResult<SendOutcome> {
    let raw_content = MessageContent {
        text: args.text.as_deref(),
        image: args.image.as_deref(),
    };
    raw_content.validate(ctx.message_policy())?;

    let image_url = match args.image.as_deref() {
        Some(image) if !image.is_empty() => Some(upload_image(ctx, image).await?),
        _ => None,
    };
    let content = MessageContent {
        text: args.text.as_deref(),
        image: image_url.as_deref(),
    };

    match args.scheduled_time {
        Some(scheduled_time) => {
            let scheduled =
                scheduler::schedule(ctx, sender_id, receiver_id, content, scheduled_time).await?;
            Ok(SendOutcome::Scheduled(scheduled))
        }
        None => {
            let message = conversations::append(ctx, sender_id, receiver_id, content).await?;
            delivery::dispatch(ctx, &message).await;
            Ok(SendOutcome::Sent(message))
        }
    }
}

async fn upload_image<C: Context>(ctx: &C, image: &str) -> ServiceResult<String> {
    match ctx.blob_store().store(image).await {
        Ok(url) => Ok(url),
        Err(e) => failure(AppError::UploadFailed, e),
    }
}

/// The viewer has read everything `sender_id` sent them.
pub async fn mark_thread_read<C: Context>(
    ctx: &C,
    sender_id: i64,
    viewer_id: i64,
) -> ServiceResult<()> {
    read_state::mark_all_read(ctx, sender_id, viewer_id).await?;
    Ok(())
}
