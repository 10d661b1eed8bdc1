use crate::common::context::Context;
use crate::entities::users::User;
use chrono::Utc;
use sqlx::SqliteExecutor;

const READ_FIELDS: &str = "id, username, created_at";

pub async fn create<C: Context>(ctx: &C, username: &str) -> sqlx::Result<User> {
    const QUERY: &str = const_str::concat!(
        "INSERT INTO users (username, created_at) VALUES (?, ?) RETURNING ",
        READ_FIELDS
    );
    sqlx::query_as(QUERY)
        .bind(username)
        .bind(Utc::now())
        .fetch_one(ctx.db())
        .await
}

/// Records both identities of a conversation. Ids that are already known are left untouched.
pub async fn ensure_known<'e, E: SqliteExecutor<'e>>(
    executor: E,
    user_ids: [i64; 2],
) -> sqlx::Result<()> {
    const QUERY: &str =
        "INSERT INTO users (id, created_at) VALUES (?, ?), (?, ?) ON CONFLICT (id) DO NOTHING";
    let now = Utc::now();
    let [first, second] = user_ids;
    sqlx::query(QUERY)
        .bind(first)
        .bind(now)
        .bind(second)
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}

/// Every known user except `user_id`, in registration order.
pub async fn fetch_all_except<C: Context>(ctx: &C, user_id: i64) -> sqlx::Result<Vec<User>> {
    const QUERY: &str = const_str::concat!(
        "SELECT ",
        READ_FIELDS,
        " FROM users WHERE id != ? ORDER BY id ASC"
    );
    sqlx::query_as(QUERY).bind(user_id).fetch_all(ctx.db()).await
}
