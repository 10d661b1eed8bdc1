use crate::api::RequestContext;
use crate::common::error::{ServiceResult, unexpected};
use crate::entities::sessions::Session as SessionEntity;
use crate::models::events::Event;
use crate::repositories::{sessions, streams};
use crate::usecases::sessions as session_usecases;

/// Drains the events pushed to the caller's session and keeps the session alive.
pub async fn poll(ctx: &RequestContext) -> ServiceResult<Vec<Event>> {
    let session: SessionEntity = session_usecases::fetch_current(ctx).await?.into();
    if let Err(e) = sessions::extend(&ctx.state.redis, &session, ctx.state.session_ttl).await {
        return unexpected(e);
    }
    match streams::read_pending_events(&ctx.state.redis, session.session_id).await {
        Ok(events) => Ok(events.into_iter().map(Event::from).collect()),
        Err(e) => unexpected(e),
    }
}
