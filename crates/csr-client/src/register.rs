use csr_protocol::{
    endpoints, HttpResponse, ProtocolResult, RegisterResponse, Transport,
};

use crate::messages;
use crate::render::Rendered;
use crate::upload::UploadInput;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created(RegisterResponse),
    /// The `(name, version)` pair is already registered.
    Conflict,
    InvalidInput,
    ServerError { message: String },
    NetworkFailure,
}

impl RegistrationOutcome {
    pub fn interpret(result: ProtocolResult<HttpResponse>) -> Self {
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "register request failed");
                return Self::NetworkFailure;
            }
        };
        tracing::debug!(status = resp.status, "register response");
        match resp.status {
            201 => match resp.json::<RegisterResponse>() {
                Ok(body) => Self::Created(body),
                Err(e) => {
                    tracing::warn!(error = %e, "undecodable register body");
                    Self::NetworkFailure
                }
            },
            409 => Self::Conflict,
            400 => Self::InvalidInput,
            status => {
                tracing::warn!(status, "unexpected register status");
                let message = resp
                    .error_message()
                    .unwrap_or_else(|| messages::REGISTER_FAILED.to_string());
                Self::ServerError { message }
            }
        }
    }

    pub fn rendered(&self) -> Rendered {
        match self {
            Self::Created(r) => {
                Rendered::ok(messages::registered(&r.name, &r.version, &r.sha256, r.index))
            }
            Self::Conflict => Rendered::warn(messages::REGISTER_CONFLICT),
            Self::InvalidInput => Rendered::ng(messages::INVALID_INPUT),
            Self::ServerError { message } => Rendered::ng(message.clone()),
            Self::NetworkFailure => Rendered::ng(messages::REGISTER_FAILED),
        }
    }

    /// Only a fresh registration changes the registry listing.
    pub fn refreshes_listing(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Submit a registration. A missing or empty file never reaches the network.
pub async fn submit<T: Transport + ?Sized>(transport: &T, input: UploadInput) -> RegistrationOutcome {
    let Some(form) = input.into_form() else {
        tracing::debug!("register rejected client-side: no file attached");
        return RegistrationOutcome::InvalidInput;
    };
    tracing::debug!(name = %form.name, version = %form.version, "registering");
    RegistrationOutcome::interpret(transport.post_multipart(endpoints::REGISTER, &form).await)
}
