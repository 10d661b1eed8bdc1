pub mod tasks;

use crate::common::context::Context;
use crate::common::init;
use crate::cron_tasks;
use crate::settings::AppSettings;
use std::convert::Infallible;
use std::time::Duration;
use tasks::promote_scheduled_messages::promote_scheduled_messages;
use tokio::time::MissedTickBehavior;
use tracing::info;

pub async fn serve(settings: &AppSettings) -> anyhow::Result<Infallible> {
    let state = init::initialize_state(settings).await?;
    Ok(run(&state, settings.scheduler_poll_interval).await)
}

/// Sweeps forever. A late or skipped tick only delays promotion; pending
/// entries stay in the store until a sweep claims them.
pub async fn run<C: Context>(ctx: &C, poll_interval: Duration) -> Infallible {
    info!(?poll_interval, "Starting scheduler sweep");
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        cron_tasks! {
            ctx,
            promote_scheduled_messages,
        }
    }
}
