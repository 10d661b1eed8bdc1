use crate::adapters::blob_store::BlobStore;
use crate::adapters::summarizer::Summarizer;
use crate::adapters::transport::Transport;
use crate::common::context::Context;
use crate::common::redis_pool::RedisPool;
use crate::models::messages::MessagePolicy;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub redis: RedisPool,
    pub transport: Arc<dyn Transport>,
    pub blob_store: Arc<dyn BlobStore>,
    pub summarizer: Arc<dyn Summarizer>,
    pub message_policy: MessagePolicy,
    pub session_ttl: Duration,
}

impl Context for AppState {
    fn db(&self) -> &Pool<Sqlite> {
        &self.db
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn blob_store(&self) -> &dyn BlobStore {
        self.blob_store.as_ref()
    }

    fn summarizer(&self) -> &dyn Summarizer {
        self.summarizer.as_ref()
    }

    fn message_policy(&self) -> MessagePolicy {
        self.message_policy
    }
}
