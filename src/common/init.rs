use crate::adapters::blob_store::HttpBlobStore;
use crate::adapters::summarizer::HttpSummarizer;
use crate::adapters::transport::RedisTransport;
use crate::common::redis_pool::{RedisPool, RedisPoolManager};
use crate::common::state::AppState;
use crate::models::messages::MessagePolicy;
use crate::settings::AppSettings;
use deadpool::Runtime;
use redis::{AsyncConnectionConfig, Commands};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

pub fn initialize_logging(settings: &AppSettings) {
    tracing_subscriber::fmt()
        .with_max_level(settings.level)
        .with_timer(tracing_subscriber::fmt::time())
        .with_level(true)
        .compact()
        .init();
}

pub async fn initialize_state(settings: &AppSettings) -> anyhow::Result<AppState> {
    let db = initialize_db(settings).await?;
    migrate(&db).await?;
    let redis = initialize_redis(settings)?;
    let transport = RedisTransport::new(redis.clone(), settings.session_ttl);
    let blob_store = HttpBlobStore::new(
        settings.blob_store_url.clone(),
        settings.blob_store_api_key.clone(),
    );
    let summarizer = HttpSummarizer::new(
        settings.summarizer_url.clone(),
        settings.summarizer_api_key.clone(),
    );
    Ok(AppState {
        db,
        redis,
        transport: Arc::new(transport),
        blob_store: Arc::new(blob_store),
        summarizer: Arc::new(summarizer),
        message_policy: MessagePolicy {
            require_content: settings.messages_require_content,
            max_length: settings.messages_max_length,
        },
        session_ttl: settings.session_ttl,
    })
}

pub async fn initialize_db(settings: &AppSettings) -> anyhow::Result<Pool<Sqlite>> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(settings.db_wait_timeout);
    let db = SqlitePoolOptions::new()
        .acquire_timeout(settings.db_wait_timeout)
        .max_connections(settings.db_max_connections as _)
        .connect_with(options)
        .await?;
    Ok(db)
}

pub async fn migrate(db: &Pool<Sqlite>) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(db).await?;
    info!("Database migrations applied");
    Ok(())
}

pub fn initialize_redis(settings: &AppSettings) -> anyhow::Result<RedisPool> {
    let redis_client = redis::Client::open(settings.redis_url.as_str())?;
    let mut conn = redis_client.get_connection_with_timeout(settings.redis_wait_timeout)?;
    let _: () = conn.ping()?;
    let redis_cfg = AsyncConnectionConfig::new()
        .set_connection_timeout(settings.redis_connection_timeout)
        .set_response_timeout(settings.redis_response_timeout);

    let redis_manager = RedisPoolManager::new(redis_client, redis_cfg);
    let redis = RedisPool::builder(redis_manager)
        .max_size(settings.redis_max_connections)
        .wait_timeout(Some(settings.redis_wait_timeout))
        .runtime(Runtime::Tokio1)
        .build()?;
    Ok(redis)
}
