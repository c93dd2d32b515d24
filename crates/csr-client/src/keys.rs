use csr_protocol::{endpoints, HttpResponse, ProtocolResult, PublicKeyResponse, Transport};

use crate::messages;
use crate::render::Rendered;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKeyOutcome {
    Fetched(PublicKeyResponse),
    Failed { message: String },
}

impl PublicKeyOutcome {
    pub fn interpret(result: ProtocolResult<HttpResponse>) -> Self {
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "public key request failed");
                return Self::failed(None);
            }
        };
        if resp.status != 200 {
            tracing::warn!(status = resp.status, "unexpected public key status");
            return Self::failed(resp.error_message());
        }
        match resp.json::<PublicKeyResponse>() {
            Ok(key) => Self::Fetched(key),
            Err(e) => {
                tracing::warn!(error = %e, "undecodable public key body");
                Self::failed(None)
            }
        }
    }

    fn failed(message: Option<String>) -> Self {
        Self::Failed { message: message.unwrap_or_else(|| messages::KEY_FAILED.to_string()) }
    }

    pub fn rendered(&self) -> Rendered {
        match self {
            Self::Fetched(key) => Rendered::ok(messages::public_key(&key.key_id)),
            Self::Failed { message } => Rendered::ng(message.clone()),
        }
    }
}

pub async fn fetch<T: Transport + ?Sized>(transport: &T) -> PublicKeyOutcome {
    PublicKeyOutcome::interpret(transport.get(endpoints::PUBLIC_KEY).await)
}
