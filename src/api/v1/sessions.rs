use crate::api::RequestContext;
use crate::common::error::ServiceResult;
use crate::common::error::ServiceResponse;
use crate::models::events::Event;
use crate::models::sessions::Session;
use crate::usecases::{events, sessions};
use axum::Json;
use axum::http::StatusCode;

pub async fn connect(ctx: RequestContext) -> ServiceResult<(StatusCode, Json<Session>)> {
    let session = sessions::connect(&ctx).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn disconnect(ctx: RequestContext) -> ServiceResult<StatusCode> {
    sessions::disconnect(&ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn poll_events(ctx: RequestContext) -> ServiceResponse<Vec<Event>> {
    let events = events::poll(&ctx).await?;
    Ok(Json(events))
}
