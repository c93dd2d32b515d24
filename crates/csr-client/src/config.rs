use std::path::Path;

use csr_protocol::HttpTransport;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Root of the registry backend; endpoint paths are appended to it.
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            user_agent: concat!("csr/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(text: &str) -> ClientResult<Self> {
        toml::from_str(text).map_err(|e| ClientError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the HTTP transport this configuration describes.
    pub fn transport(&self) -> ClientResult<HttpTransport> {
        Ok(HttpTransport::with_user_agent(&self.base_url, &self.user_agent)?)
    }
}
