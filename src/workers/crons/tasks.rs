/// Runs each task against the context once, logging its outcome and duration.
/// A failing task is logged and does not stop the ones after it.
#[macro_export]
macro_rules! cron_tasks {
    ($ctx:expr, $($t:path),* $(,)?) => {
        $({
            const TASK_NAME: &str = const_str::convert_ascii_case!(upper_camel, stringify!($t));
            let now = std::time::Instant::now();
            tracing::debug!(task = TASK_NAME, "Starting Task {TASK_NAME}");
            match ($t)($ctx).await {
                Ok(v) => tracing::debug!(
                    task = TASK_NAME,
                    "Completed Task {TASK_NAME} in {:?} with result {v:?}",
                    now.elapsed()
                ),
                Err(e) => tracing::error!(task = TASK_NAME, "Error occurred in {TASK_NAME}: {e:?}"),
            }
        })*
    };
}
