use crate::api::RequestContext;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::sessions::Session;
use crate::repositories::sessions;
use tracing::info;

/// Makes the caller reachable, replacing any session they already had.
pub async fn connect(ctx: &RequestContext) -> ServiceResult<Session> {
    let user_id = ctx.identity.user_id;
    match sessions::create(&ctx.state.redis, user_id, ctx.state.session_ttl).await {
        Ok(session) => {
            info!(
                session_id = session.session_id.to_string(),
                user_id, "Session connected"
            );
            Ok(Session::from(session))
        }
        Err(e) => unexpected(e),
    }
}

pub async fn fetch_current(ctx: &RequestContext) -> ServiceResult<Session> {
    match sessions::fetch_one_by_user_id(&ctx.state.redis, ctx.identity.user_id).await {
        Ok(Some(session)) => Ok(Session::from(session)),
        Ok(None) => Err(AppError::SessionsNotFound),
        Err(e) => unexpected(e),
    }
}

pub async fn disconnect(ctx: &RequestContext) -> ServiceResult<()> {
    let session = match sessions::fetch_one_by_user_id(&ctx.state.redis, ctx.identity.user_id).await {
        Ok(Some(session)) => session,
        Ok(None) => return Err(AppError::SessionsNotFound),
        Err(e) => return unexpected(e),
    };
    match sessions::delete(&ctx.state.redis, &session).await {
        Ok(()) => {
            info!(
                session_id = session.session_id.to_string(),
                user_id = session.user_id,
                "Session disconnected"
            );
            Ok(())
        }
        Err(e) => unexpected(e),
    }
}
