use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ProtocolResult;
use crate::message::api_error_message;

/// A file attached to an upload form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileBlob {
    pub filename: String,
    pub content: Bytes,
}

impl FileBlob {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self { filename: filename.into(), content: content.into() }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Multipart body shared by the register and verify endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadForm {
    pub name: String,
    pub version: String,
    pub file: FileBlob,
}

/// Status and raw body of a completed exchange.
///
/// The body is kept undecoded so each flow decides which statuses carry a
/// body worth parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn json<T: DeserializeOwned>(&self) -> ProtocolResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// `error.message` from the generic error envelope, if the body has one.
    pub fn error_message(&self) -> Option<String> {
        api_error_message(&self.body)
    }
}

/// Transport interface for the registry backend.
///
/// Every call is a single attempt; implementations never retry and never
/// impose a timeout of their own.
#[async_trait(?Send)]
pub trait Transport {
    async fn get(&self, path: &str) -> ProtocolResult<HttpResponse>;
    async fn post_empty(&self, path: &str) -> ProtocolResult<HttpResponse>;
    async fn post_multipart(&self, path: &str, form: &UploadForm) -> ProtocolResult<HttpResponse>;
}
