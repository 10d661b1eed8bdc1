use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct SummarizeArgs {
    /// Entries that are not strings are ignored.
    pub messages: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}
