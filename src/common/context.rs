use crate::adapters::blob_store::BlobStore;
use crate::adapters::summarizer::Summarizer;
use crate::adapters::transport::Transport;
use crate::models::messages::MessagePolicy;
use sqlx::{Pool, Sqlite};

/// Everything a usecase may touch. Request handlers and background workers
/// both implement it, so usecases never reach for global state.
pub trait Context: Sync + Send {
    fn db(&self) -> &Pool<Sqlite>;
    fn transport(&self) -> &dyn Transport;
    fn blob_store(&self) -> &dyn BlobStore;
    fn summarizer(&self) -> &dyn Summarizer;
    fn message_policy(&self) -> MessagePolicy;
}
