use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, failure};
use tracing::info;

/// Summarizes the given chat lines. Non-string and blank entries are dropped first.
pub async fn summarize<C: Context>(
    ctx: &C,
    messages: Option<Vec<serde_json::Value>>,
) -> ServiceResult<String> {
    let messages = match messages {
        Some(messages) if !messages.is_empty() => messages,
        _ => return Err(AppError::SummariesNoMessages),
    };

    let lines: Vec<&str> = messages
        .iter()
        .filter_map(serde_json::Value::as_str)
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return Err(AppError::SummariesEmptyMessages);
    }

    let text = lines.join("\n");
    match ctx.summarizer().summarize(&text).await {
        Ok(summary) => {
            info!(lines = lines.len(), "Summarized messages");
            Ok(summary)
        }
        Err(e) => failure(AppError::AnalysisFailed, e),
    }
}
