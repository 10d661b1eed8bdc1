use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> anyhow::Result<String>;
}

pub struct HttpSummarizer {
    base_url: String,
    api_key: Option<String>,
}

impl HttpSummarizer {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self { base_url, api_key }
    }

    fn make_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    text: &'a str,
    model: &'static str,
    length: &'static str,
    format: &'static str,
    temperature: f32,
    extractiveness: &'static str,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, text: &str) -> anyhow::Result<String> {
        let url = self.make_url("/v1/summarize");
        let body = SummarizeRequest {
            text,
            model: "command",
            length: "long",
            format: "bullets",
            temperature: 0.3,
            extractiveness: "low",
        };
        let mut request = CLIENT.post(url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }
        let response = request.send().await?.error_for_status()?;
        let result: SummarizeResponse = response.json().await?;
        Ok(result.summary)
    }
}
