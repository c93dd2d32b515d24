//! Ledger verification: one request, two independently rendered results.
//!
//! The chain result comes from `valid`/`error`, the signature result from
//! `checks.signature_valid`. Neither is derived from the other; a body
//! reporting a valid chain with an invalid signature is shown as exactly
//! that.

use csr_protocol::{endpoints, HttpResponse, LedgerVerification, ProtocolResult, Transport};

use crate::messages;
use crate::render::Rendered;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerOutcome {
    /// `200` with `valid = true`.
    Intact(LedgerVerification),
    /// `409` with `valid = false`.
    Broken(LedgerVerification),
    /// Any other status, an undecodable body, or a transport failure.
    Failed { message: String },
}

/// What the two result regions show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerReport {
    pub chain: Rendered,
    pub signature: Rendered,
}

impl LedgerReport {
    /// Shown on both regions while the request is in flight.
    pub fn running() -> Self {
        Self {
            chain: Rendered::neutral(messages::LEDGER_RUNNING),
            signature: Rendered::neutral(messages::SIGNATURE_RUNNING),
        }
    }
}

impl LedgerOutcome {
    pub fn interpret(result: ProtocolResult<HttpResponse>) -> Self {
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "ledger verify request failed");
                return Self::failed(None);
            }
        };
        tracing::debug!(status = resp.status, "ledger verify response");
        if !matches!(resp.status, 200 | 409) {
            tracing::warn!(status = resp.status, "unexpected ledger verify status");
            return Self::failed(resp.error_message());
        }
        let body = match resp.json::<LedgerVerification>() {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "undecodable ledger verify body");
                return Self::failed(resp.error_message());
            }
        };
        match (resp.status, body.valid) {
            (200, true) => Self::Intact(body),
            (409, false) => Self::Broken(body),
            (status, valid) => {
                tracing::warn!(status, valid, "ledger verify status disagrees with body");
                Self::failed(resp.error_message())
            }
        }
    }

    fn failed(message: Option<String>) -> Self {
        Self::Failed { message: message.unwrap_or_else(|| messages::LEDGER_FAILED.to_string()) }
    }

    pub fn report(&self) -> LedgerReport {
        match self {
            Self::Intact(body) => {
                let chain = match body.checked_blocks {
                    Some(n) => Rendered::ok(format!("{}（{n} ブロック）", messages::LEDGER_OK)),
                    None => Rendered::ok(messages::LEDGER_OK),
                };
                LedgerReport { chain, signature: signature_result(body) }
            }
            Self::Broken(body) => {
                let fault = body.error.as_ref();
                let chain = Rendered::ng(messages::ledger_broken(
                    fault.and_then(|f| f.index),
                    fault.and_then(|f| f.reason.as_deref()),
                ));
                LedgerReport { chain, signature: signature_result(body) }
            }
            Self::Failed { message } => LedgerReport {
                chain: Rendered::ng(message.clone()),
                signature: Rendered::ng(messages::SIGNATURE_FAILED),
            },
        }
    }
}

/// Missing signature data counts as a failed check, never as unknown.
fn signature_result(body: &LedgerVerification) -> Rendered {
    match body.signature_valid() {
        Some(true) => Rendered::ok(messages::SIGNATURE_OK),
        Some(false) | None => Rendered::ng(messages::SIGNATURE_NG),
    }
}

pub async fn run<T: Transport + ?Sized>(transport: &T) -> LedgerOutcome {
    LedgerOutcome::interpret(transport.post_empty(endpoints::LEDGER_VERIFY).await)
}
