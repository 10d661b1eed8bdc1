use crate::common::context::Context;
use crate::models::events::NEW_MESSAGE;
use crate::models::messages::Message;
use tracing::{debug, warn};

/// Pushes a freshly stored message to the receiver if they are reachable.
///
/// Never fails: the message is already durable, so an unreachable receiver or
/// a failed push only means it shows up on their next fetch instead.
pub async fn dispatch<C: Context>(ctx: &C, message: &Message) {
    let transport = ctx.transport();
    let session_id = match transport.reachable_session_for(message.receiver_id).await {
        Ok(Some(session_id)) => session_id,
        Ok(None) => {
            debug!(
                message_id = message.id,
                receiver_id = message.receiver_id,
                "Receiver is not reachable, skipping push"
            );
            return;
        }
        Err(e) => {
            warn!(
                message_id = message.id,
                receiver_id = message.receiver_id,
                "Failed to look up receiver session: {e:?}"
            );
            return;
        }
    };

    let payload = match serde_json::to_value(message) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(message_id = message.id, "Failed to encode message event: {e:?}");
            return;
        }
    };
    match transport.push(session_id, NEW_MESSAGE, &payload).await {
        Ok(()) => debug!(
            message_id = message.id,
            receiver_id = message.receiver_id,
            session_id = session_id.to_string(),
            "Pushed message to receiver"
        ),
        Err(e) => warn!(
            message_id = message.id,
            receiver_id = message.receiver_id,
            session_id = session_id.to_string(),
            "Failed to push message to receiver: {e:?}"
        ),
    }
}
