use deadpool::managed::{Manager, Metrics, Object, Pool, PoolError, RecycleError, RecycleResult};
use redis::{AsyncConnectionConfig, RedisError, RedisResult};
use tracing::debug;

pub struct RedisPoolManager {
    client: redis::Client,
    config: AsyncConnectionConfig,
}

impl RedisPoolManager {
    pub fn new(client: redis::Client, config: AsyncConnectionConfig) -> Self {
        Self { client, config }
    }
}

impl Manager for RedisPoolManager {
    type Type = redis::aio::MultiplexedConnection;
    type Error = RedisError;

    async fn create(&self) -> RedisResult<Self::Type> {
        self.client
            .get_multiplexed_async_connection_with_config(&self.config)
            .await
    }

    async fn recycle(&self, conn: &mut Self::Type, metrics: &Metrics) -> RecycleResult<Self::Error> {
        let pong: String = redis::cmd("PING").query_async(conn).await?;
        if pong != "PONG" {
            debug!(
                recycle_count = metrics.recycle_count,
                "Discarding redis connection with unexpected ping reply"
            );
            return Err(RecycleError::Message("unexpected ping reply".into()));
        }
        Ok(())
    }
}

pub type RedisPool = Pool<RedisPoolManager>;
pub type Connection = Object<RedisPoolManager>;
pub type Error = PoolError<RedisError>;
pub type PoolResult = Result<Connection, Error>;
