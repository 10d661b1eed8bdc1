use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `data` (a data URI or base64 payload) and returns its public URL.
    async fn store(&self, data: &str) -> anyhow::Result<String>;
}

pub struct HttpBlobStore {
    base_url: String,
    api_key: Option<String>,
}

impl HttpBlobStore {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self { base_url, api_key }
    }

    fn make_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    file: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn store(&self, data: &str) -> anyhow::Result<String> {
        let url = self.make_url("/upload");
        let mut request = CLIENT.post(url).json(&UploadRequest { file: data });
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }
        let response = request.send().await?.error_for_status()?;
        let uploaded: UploadResponse = response.json().await?;
        Ok(uploaded.secure_url)
    }
}
