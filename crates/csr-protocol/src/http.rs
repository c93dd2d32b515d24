use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::error::{ProtocolError, ProtocolResult};
use crate::transport::{HttpResponse, Transport, UploadForm};

/// reqwest-backed transport rooted at a base URL such as `http://127.0.0.1:8000`.
///
/// The underlying client is built without a request timeout: a hung
/// request stays pending until the backend answers or the connection drops.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> ProtocolResult<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_user_agent(base_url: &str, user_agent: &str) -> ProtocolResult<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> ProtocolResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let invalid = || ProtocolError::InvalidBaseUrl(base_url.to_string());
        let parsed = reqwest::Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(invalid());
        }
        Ok(Self { base_url: trimmed.to_string(), client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn finish(resp: reqwest::Response) -> ProtocolResult<HttpResponse> {
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        tracing::debug!(status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, body })
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> ProtocolResult<HttpResponse> {
        tracing::debug!(path, "GET");
        let resp = self.client.get(self.url(path)).send().await?;
        Self::finish(resp).await
    }

    async fn post_empty(&self, path: &str) -> ProtocolResult<HttpResponse> {
        tracing::debug!(path, "POST");
        let resp = self.client.post(self.url(path)).send().await?;
        Self::finish(resp).await
    }

    async fn post_multipart(&self, path: &str, form: &UploadForm) -> ProtocolResult<HttpResponse> {
        tracing::debug!(path, file = %form.file.filename, bytes = form.file.len(), "POST multipart");
        let file = Part::bytes(form.file.content.to_vec()).file_name(form.file.filename.clone());
        let multipart = Form::new()
            .text("name", form.name.clone())
            .text("version", form.version.clone())
            .part("file", file);
        let resp = self
            .client
            .post(self.url(path))
            .multipart(multipart)
            .send()
            .await?;
        Self::finish(resp).await
    }
}
