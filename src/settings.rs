use crate::common::env::FromEnv;
use std::env;
use std::net::IpAddr;
use std::ops::Deref;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::Level;

pub struct AppSettings {
    pub app_component: String,
    pub level: Level,
    pub app_host: IpAddr,
    pub app_port: u16,

    pub database_url: String,
    pub db_max_connections: usize,
    pub db_wait_timeout: Duration,

    pub redis_url: String,
    pub redis_max_connections: usize,
    pub redis_connection_timeout: Duration,
    pub redis_response_timeout: Duration,
    pub redis_wait_timeout: Duration,

    pub session_ttl: Duration,

    pub scheduler_poll_interval: Duration,
    pub scheduler_in_process: bool,

    pub messages_require_content: bool,
    pub messages_max_length: Option<usize>,

    pub blob_store_url: String,
    pub blob_store_api_key: Option<String>,
    pub summarizer_url: String,
    pub summarizer_api_key: Option<String>,
}

impl AppSettings {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv();

        let app_component = env::var("APP_COMPONENT")?;
        let level = Level::from_env("LOG_LEVEL")?;
        let app_host = IpAddr::from_env("APP_HOST")?;
        let app_port = u16::from_env("APP_PORT")?;

        let database_url = env::var("DATABASE_URL")?;
        let db_max_connections = usize::from_env("DB_MAX_CONNECTIONS")?;
        let db_wait_timeout_secs = u64::from_env("DB_WAIT_TIMEOUT_SECS")?;
        let db_wait_timeout = Duration::from_secs(db_wait_timeout_secs);

        let redis_url = env::var("REDIS_URL")?;
        let redis_max_connections = usize::from_env("REDIS_MAX_CONNECTIONS")?;
        let redis_connection_timeout_secs = u64::from_env("REDIS_CONNECTION_TIMEOUT_SECS")?;
        let redis_connection_timeout = Duration::from_secs(redis_connection_timeout_secs);
        let redis_response_timeout_secs = u64::from_env("REDIS_RESPONSE_TIMEOUT_SECS")?;
        let redis_response_timeout = Duration::from_secs(redis_response_timeout_secs);
        let redis_wait_timeout_secs = u64::from_env("REDIS_WAIT_TIMEOUT_SECS")?;
        let redis_wait_timeout = Duration::from_secs(redis_wait_timeout_secs);

        let session_ttl_secs = u64::from_env("SESSION_TTL_SECS")?;
        let session_ttl = Duration::from_secs(session_ttl_secs);

        let scheduler_poll_interval_secs = u64::from_env("SCHEDULER_POLL_INTERVAL_SECS")?;
        let scheduler_poll_interval = Duration::from_secs(scheduler_poll_interval_secs);
        let scheduler_in_process = bool::from_env_opt("SCHEDULER_IN_PROCESS")?.unwrap_or(false);

        let messages_require_content =
            bool::from_env_opt("MESSAGES_REQUIRE_CONTENT")?.unwrap_or(false);
        let messages_max_length = usize::from_env_opt("MESSAGES_MAX_LENGTH")?;

        let blob_store_url = env::var("BLOB_STORE_URL")?;
        let blob_store_api_key = env::var("BLOB_STORE_API_KEY").ok();
        let summarizer_url = env::var("SUMMARIZER_URL")?;
        let summarizer_api_key = env::var("SUMMARIZER_API_KEY").ok();

        Ok(AppSettings {
            app_component,
            level,
            app_port,
            app_host,

            database_url,
            db_max_connections,
            db_wait_timeout,

            redis_url,
            redis_max_connections,
            redis_connection_timeout,
            redis_response_timeout,
            redis_wait_timeout,

            session_ttl,

            scheduler_poll_interval,
            scheduler_in_process,

            messages_require_content,
            messages_max_length,

            blob_store_url,
            blob_store_api_key,
            summarizer_url,
            summarizer_api_key,
        })
    }

    pub fn get() -> &'static AppSettings {
        settings()
    }
}

pub fn settings() -> &'static AppSettings {
    static SETTINGS: LazyLock<AppSettings> =
        LazyLock::new(|| AppSettings::load_from_env().expect("Failed to load settings"));
    SETTINGS.deref()
}
