use csr_protocol::{endpoints, HttpResponse, ProtocolResult, Transport, VerifyResponse};

use crate::messages;
use crate::render::Rendered;
use crate::upload::UploadInput;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationOutcome {
    Match(VerifyResponse),
    NotFound,
    InvalidInput,
    ServerError { message: String },
    NetworkFailure,
}

impl VerificationOutcome {
    pub fn interpret(result: ProtocolResult<HttpResponse>) -> Self {
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "verify request failed");
                return Self::NetworkFailure;
            }
        };
        tracing::debug!(status = resp.status, "verify response");
        match resp.status {
            200 => match resp.json::<VerifyResponse>() {
                Ok(body) => Self::Match(body),
                Err(e) => {
                    tracing::warn!(error = %e, "undecodable verify body");
                    Self::NetworkFailure
                }
            },
            404 => Self::NotFound,
            400 => Self::InvalidInput,
            status => {
                tracing::warn!(status, "unexpected verify status");
                let message = resp
                    .error_message()
                    .unwrap_or_else(|| messages::VERIFY_FAILED.to_string());
                Self::ServerError { message }
            }
        }
    }

    pub fn rendered(&self) -> Rendered {
        match self {
            Self::Match(v) => {
                let mut text = messages::verified(&v.name, &v.version, &v.sha256, &v.match_mode);
                if let Some(index) = v.index {
                    text.push_str(&format!(" / index={index}"));
                }
                Rendered::ok(text)
            }
            Self::NotFound => Rendered::warn(messages::VERIFY_NOT_FOUND),
            Self::InvalidInput => Rendered::ng(messages::INVALID_INPUT),
            Self::ServerError { message } => Rendered::ng(message.clone()),
            Self::NetworkFailure => Rendered::ng(messages::VERIFY_FAILED),
        }
    }
}

/// Verify a file against its registration. A missing or empty file never
/// reaches the network.
pub async fn submit<T: Transport + ?Sized>(transport: &T, input: UploadInput) -> VerificationOutcome {
    let Some(form) = input.into_form() else {
        tracing::debug!("verify rejected client-side: no file attached");
        return VerificationOutcome::InvalidInput;
    };
    tracing::debug!(name = %form.name, version = %form.version, "verifying");
    VerificationOutcome::interpret(transport.post_multipart(endpoints::VERIFY, &form).await)
}
