use crate::common::context::Context;
use crate::common::error::{ServiceResult, store_unavailable};
use crate::entities::messages::CreateMessageArgs;
use crate::models::messages::{Message, MessageContent};
use crate::models::users::Peer;
use crate::repositories::{messages, users};
use crate::usecases::read_state;
use tracing::info;

/// Every other known user, flagged when they have sent the viewer something unread.
pub async fn list_peers<C: Context>(ctx: &C, viewer_id: i64) -> ServiceResult<Vec<Peer>> {
    let users = match users::fetch_all_except(ctx, viewer_id).await {
        Ok(users) => users,
        Err(e) => return store_unavailable(e),
    };
    let unread_counts = read_state::unread_counts(ctx, viewer_id).await?;
    let peers = users
        .into_iter()
        .map(|user| {
            let has_unread = unread_counts.get(&user.id).is_some_and(|count| *count > 0);
            Peer::new(user, has_unread)
        })
        .collect();
    Ok(peers)
}

/// The whole thread between two users, both directions, oldest first.
pub async fn list_messages<C: Context>(
    ctx: &C,
    user_a: i64,
    user_b: i64,
) -> ServiceResult<Vec<Message>> {
    match messages::fetch_thread(ctx, user_a, user_b).await {
        Ok(messages) => Ok(messages.into_iter().map(Message::from).collect()),
        Err(e) => store_unavailable(e),
    }
}

pub async fn append<C: Context>(
    ctx: &C,
    sender_id: i64,
    receiver_id: i64,
    content: MessageContent<'_>,
) -> ServiceResult<Message> {
    content.validate(ctx.message_policy())?;
    let args = CreateMessageArgs {
        sender_id,
        receiver_id,
        text: content.text,
        image: content.image,
    };
    match messages::create_with_participants(ctx, args).await {
        Ok(message) => {
            info!(
                message_id = message.id,
                sender_id, receiver_id, "Stored message"
            );
            Ok(Message::from(message))
        }
        Err(e) => store_unavailable(e),
    }
}
