#![allow(dead_code)]

use async_trait::async_trait;
use chat_service::adapters::blob_store::BlobStore;
use chat_service::adapters::summarizer::Summarizer;
use chat_service::adapters::transport::Transport;
use chat_service::common::context::Context;
use chat_service::common::init;
use chat_service::models::messages::MessagePolicy;
use chat_service::repositories::users;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PushedEvent {
    pub session_id: Uuid,
    pub event: String,
    pub payload: serde_json::Value,
}

/// In-memory connection registry that records every push.
#[derive(Default)]
pub struct FakeTransport {
    pub sessions: Mutex<HashMap<i64, Uuid>>,
    pub pushed: Mutex<Vec<PushedEvent>>,
    pub fail_lookup: bool,
    pub fail_push: bool,
}

impl FakeTransport {
    pub fn connect(&self, user_id: i64) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions.lock().unwrap().insert(user_id, session_id);
        session_id
    }

    pub fn pushed(&self) -> Vec<PushedEvent> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn reachable_session_for(&self, user_id: i64) -> anyhow::Result<Option<Uuid>> {
        if self.fail_lookup {
            anyhow::bail!("registry unavailable");
        }
        Ok(self.sessions.lock().unwrap().get(&user_id).copied())
    }

    async fn push(
        &self,
        session_id: Uuid,
        event: &str,
        payload: &serde_json::Value,
    ) -> anyhow::Result<()> {
        if self.fail_push {
            anyhow::bail!("connection reset");
        }
        self.pushed.lock().unwrap().push(PushedEvent {
            session_id,
            event: event.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeBlobStore {
    pub fail: bool,
    pub uploads: Mutex<Vec<String>>,
}

impl FakeBlobStore {
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for FakeBlobStore {
    async fn store(&self, data: &str) -> anyhow::Result<String> {
        if self.fail {
            anyhow::bail!("upload rejected");
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(data.to_string());
        Ok(format!("https://blobs.example/{}.png", uploads.len()))
    }
}

#[derive(Default)]
pub struct FakeSummarizer {
    pub fail: bool,
    inputs: Mutex<Vec<String>>,
}

impl FakeSummarizer {
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, text: &str) -> anyhow::Result<String> {
        if self.fail {
            anyhow::bail!("model overloaded");
        }
        self.inputs.lock().unwrap().push(text.to_string());
        Ok(format!("- {} lines", text.lines().count()))
    }
}

pub struct TestContext {
    pub db: Pool<Sqlite>,
    pub transport: FakeTransport,
    pub blob_store: FakeBlobStore,
    pub summarizer: FakeSummarizer,
    pub message_policy: MessagePolicy,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_parts(FakeTransport::default(), FakeBlobStore::default()).await
    }

    pub async fn with_parts(transport: FakeTransport, blob_store: FakeBlobStore) -> Self {
        // a single long-lived connection keeps the in-memory database alive
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database");
        Self::from_pool(db, transport, blob_store).await
    }

    /// A WAL database file at `path` shared by up to `max_connections` connections,
    /// so transactions from different tasks really run side by side.
    pub async fn on_disk(path: &Path, max_connections: u32) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30));
        let db = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .expect("failed to open database file");
        Self::from_pool(db, FakeTransport::default(), FakeBlobStore::default()).await
    }

    async fn from_pool(
        db: Pool<Sqlite>,
        transport: FakeTransport,
        blob_store: FakeBlobStore,
    ) -> Self {
        init::migrate(&db).await.expect("failed to run migrations");
        Self {
            db,
            transport,
            blob_store,
            summarizer: FakeSummarizer::default(),
            message_policy: MessagePolicy::default(),
        }
    }

    pub async fn user(&self, username: &str) -> i64 {
        users::create(self, username)
            .await
            .expect("failed to create user")
            .id
    }
}

impl Context for TestContext {
    fn db(&self) -> &Pool<Sqlite> {
        &self.db
    }

    fn transport(&self) -> &dyn Transport {
        &self.transport
    }

    fn blob_store(&self) -> &dyn BlobStore {
        &self.blob_store
    }

    fn summarizer(&self) -> &dyn Summarizer {
        &self.summarizer
    }

    fn message_policy(&self) -> MessagePolicy {
        self.message_policy
    }
}

pub fn text(text: &str) -> chat_service::models::messages::SendMessageArgs {
    chat_service::models::messages::SendMessageArgs {
        text: Some(text.to_string()),
        ..Default::default()
    }
}

/// A fresh database file path under the system temp dir.
pub fn temp_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("chat-service-{}.db", Uuid::new_v4()))
}

/// Removes the database file and its WAL side files.
pub fn remove_db_files(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
