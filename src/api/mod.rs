use crate::adapters::blob_store::BlobStore;
use crate::adapters::summarizer::Summarizer;
use crate::adapters::transport::Transport;
use crate::common::axum_identity::Identity;
use crate::common::context::Context;
use crate::common::error::AppError;
use crate::common::init;
use crate::common::state::AppState;
use crate::models::messages::MessagePolicy;
use crate::settings::AppSettings;
use crate::workers::crons::scheduler_cron;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::routing::get;
use sqlx::{Pool, Sqlite};
use std::net::SocketAddr;
use tracing::info;

pub mod v1;

/// Per-request view of the application state, bound to the authenticated caller.
pub struct RequestContext {
    pub state: AppState,
    pub identity: Identity,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .nest("/api/v1", v1::router())
}

pub async fn index() -> &'static str {
    "Running chat-service v0.1"
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings).await?;
    if settings.scheduler_in_process {
        let scheduler_state = state.clone();
        let poll_interval = settings.scheduler_poll_interval;
        tokio::spawn(async move { scheduler_cron::run(&scheduler_state, poll_interval).await });
    }

    let app = router().with_state(state);
    let addr = SocketAddr::new(settings.app_host, settings.app_port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving chat-service on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        Ok(Self {
            state: state.clone(),
            identity,
        })
    }
}

impl Context for RequestContext {
    fn db(&self) -> &Pool<Sqlite> {
        self.state.db()
    }

    fn transport(&self) -> &dyn Transport {
        self.state.transport()
    }

    fn blob_store(&self) -> &dyn BlobStore {
        self.state.blob_store()
    }

    fn summarizer(&self) -> &dyn Summarizer {
        self.state.summarizer()
    }

    fn message_policy(&self) -> MessagePolicy {
        self.state.message_policy()
    }
}
