use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    failure(AppError::Unexpected, e)
}

/// The durable store could not be reached or rejected the write.
#[track_caller]
pub fn store_unavailable<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    failure(AppError::StoreUnavailable, e)
}

/// Logs the underlying error with the caller's location and surfaces only `error`.
#[track_caller]
pub fn failure<T, E: Into<anyhow::Error>>(error: AppError, e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    let code = error.code();
    error!(code, "An error has occurred at {caller}: {:?}", e.into());
    Err(error)
}

#[derive(Debug)]
pub enum AppError {
    Unexpected,
    Unauthorized,
    DecodingRequestFailed,

    StoreUnavailable,
    UploadFailed,
    AnalysisFailed,

    MessagesEmpty,
    MessagesTooLong,

    ScheduledMessagesNotFound,
    ScheduledMessagesNotPending,

    SessionsNotFound,

    SummariesNoMessages,
    SummariesEmptyMessages,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected => "unexpected",
            AppError::Unauthorized => "unauthorized",
            AppError::DecodingRequestFailed => "decoding_request_failed",

            AppError::StoreUnavailable => "store.unavailable",
            AppError::UploadFailed => "uploads.failed",
            AppError::AnalysisFailed => "summaries.failed",

            AppError::MessagesEmpty => "messages.empty",
            AppError::MessagesTooLong => "messages.too_long",

            AppError::ScheduledMessagesNotFound => "scheduled_messages.not_found",
            AppError::ScheduledMessagesNotPending => "scheduled_messages.not_pending",

            AppError::SessionsNotFound => "sessions.not_found",

            AppError::SummariesNoMessages => "summaries.no_messages",
            AppError::SummariesEmptyMessages => "summaries.empty_messages",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected => "An unexpected error has occurred.",
            AppError::Unauthorized => "You are not authorized to perform this action.",
            AppError::DecodingRequestFailed => "Failed to decode request",

            AppError::StoreUnavailable => "The message store is currently unavailable.",
            AppError::UploadFailed => "Failed to upload the attached image.",
            AppError::AnalysisFailed => "Failed to summarize messages.",

            AppError::MessagesEmpty => "Your message has no text or image. It has not been sent.",
            AppError::MessagesTooLong => "Your message was too long. It has not been sent.",

            AppError::ScheduledMessagesNotFound => "The scheduled message could not be found.",
            AppError::ScheduledMessagesNotPending => {
                "The scheduled message has already been sent or cancelled."
            }

            AppError::SessionsNotFound => "You are currently not connected.",

            AppError::SummariesNoMessages => "Invalid or empty messages.",
            AppError::SummariesEmptyMessages => "All messages are empty or invalid.",
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::DecodingRequestFailed
            | AppError::MessagesEmpty
            | AppError::MessagesTooLong
            | AppError::SummariesNoMessages
            | AppError::SummariesEmptyMessages => StatusCode::BAD_REQUEST,

            AppError::Unauthorized => StatusCode::UNAUTHORIZED,

            AppError::ScheduledMessagesNotFound | AppError::SessionsNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::ScheduledMessagesNotPending => StatusCode::CONFLICT,

            AppError::UploadFailed | AppError::AnalysisFailed => StatusCode::BAD_GATEWAY,

            AppError::Unexpected | AppError::StoreUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub const fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            code: self.code(),
            message: self.message(),
        };
        (status, Json(response))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}
