use std::cell::RefCell;

use csr_protocol::{endpoints, AnchorSnapshot, HttpResponse, ProtocolResult, Transport};

use crate::messages;
use crate::render::Rendered;
use crate::surface::Clipboard;

/// Single-slot holder of the most recently fetched anchor.
///
/// Every fetch overwrites the slot: a successful one with the new snapshot,
/// a failed one with nothing, so readers never see a stale anchor.
#[derive(Debug, Default)]
pub struct AnchorCache {
    slot: RefCell<Option<AnchorSnapshot>>,
}

impl AnchorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<AnchorSnapshot> {
        self.slot.borrow().clone()
    }

    pub fn set(&self, snapshot: Option<AnchorSnapshot>) {
        match &snapshot {
            Some(s) => tracing::info!(latest_index = s.latest_index, "anchor cached"),
            None => tracing::info!("anchor cache cleared"),
        }
        *self.slot.borrow_mut() = snapshot;
    }

    pub fn is_ready(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnchorOutcome {
    Fetched(AnchorSnapshot),
    Failed { message: String },
}

impl AnchorOutcome {
    pub fn interpret(result: ProtocolResult<HttpResponse>) -> Self {
        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "anchor request failed");
                return Self::failed(None);
            }
        };
        tracing::debug!(status = resp.status, "anchor response");
        if resp.status != 200 {
            tracing::warn!(status = resp.status, "unexpected anchor status");
            return Self::failed(resp.error_message());
        }
        match resp.json::<AnchorSnapshot>() {
            Ok(snapshot) => Self::Fetched(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "undecodable anchor body");
                Self::failed(None)
            }
        }
    }

    fn failed(message: Option<String>) -> Self {
        Self::Failed { message: message.unwrap_or_else(|| messages::ANCHOR_FAILED.to_string()) }
    }

    /// The value the cache holds after this outcome.
    pub fn snapshot(&self) -> Option<AnchorSnapshot> {
        match self {
            Self::Fetched(s) => Some(s.clone()),
            Self::Failed { .. } => None,
        }
    }

    pub fn rendered(&self) -> Rendered {
        match self {
            Self::Fetched(s) => {
                let mut text = messages::anchor_fetched(s.latest_index, &s.block_hash);
                if let Some(ts) = &s.timestamp_utc {
                    text.push_str(&format!(", timestamp_utc={ts}"));
                }
                Rendered::ok(text)
            }
            Self::Failed { message } => Rendered::ng(message.clone()),
        }
    }
}

pub async fn fetch<T: Transport + ?Sized>(transport: &T) -> AnchorOutcome {
    AnchorOutcome::interpret(transport.get(endpoints::ANCHOR_LATEST).await)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorField {
    BlockHash,
    Signature,
}

impl AnchorField {
    fn pick(self, snapshot: &AnchorSnapshot) -> &str {
        match self {
            Self::BlockHash => &snapshot.block_hash,
            Self::Signature => &snapshot.signature,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(AnchorField),
    /// No anchor has been fetched, or the last fetch failed.
    NothingCached,
    ClipboardFailed { reason: String },
}

impl CopyOutcome {
    pub fn rendered(&self) -> Rendered {
        match self {
            Self::Copied(AnchorField::BlockHash) => Rendered::ok(messages::COPY_HASH_OK),
            Self::Copied(AnchorField::Signature) => Rendered::ok(messages::COPY_SIGNATURE_OK),
            Self::NothingCached => Rendered::warn(messages::ANCHOR_FETCH_FIRST),
            Self::ClipboardFailed { .. } => Rendered::ng(messages::COPY_FAILED),
        }
    }
}

/// Copy one field of the cached anchor. The clipboard is not touched when
/// the cache is empty.
pub async fn copy_field(
    cache: &AnchorCache,
    clipboard: &dyn Clipboard,
    field: AnchorField,
) -> CopyOutcome {
    let Some(snapshot) = cache.get() else {
        return CopyOutcome::NothingCached;
    };
    match clipboard.write_text(field.pick(&snapshot)).await {
        Ok(()) => CopyOutcome::Copied(field),
        Err(e) => {
            tracing::warn!(error = %e, ?field, "clipboard write failed");
            CopyOutcome::ClipboardFailed { reason: e.to_string() }
        }
    }
}
