//! Client orchestration for the Checksum Registry.
//!
//! Each user action (register, verify, list, ledger verify, anchor fetch,
//! public key fetch) is a flow that guards its own trigger, issues a single
//! request, folds the response into an outcome enum, and renders exactly one
//! message per result region. The UI is abstracted behind the traits in
//! [`surface`]; [`Dashboard`] wires the flows to a concrete surface.
//!
//! Everything runs on one logical thread: surfaces and the anchor cache use
//! `Rc`/`RefCell`, and futures are not `Send`.

pub mod anchor;
pub mod busy;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod keys;
pub mod ledger;
pub mod listing;
pub mod markup;
pub mod messages;
pub mod register;
pub mod render;
pub mod surface;
pub mod upload;
pub mod verify;

#[cfg(test)]
pub(crate) mod testkit;

pub use anchor::{AnchorCache, AnchorField, AnchorOutcome, CopyOutcome};
pub use busy::{BusyControl, BusyGuard};
pub use config::ClientConfig;
pub use dashboard::{Action, Dashboard, Surfaces};
pub use error::{ClientError, ClientResult};
pub use health::HealthStatus;
pub use keys::PublicKeyOutcome;
pub use ledger::{LedgerOutcome, LedgerReport};
pub use listing::ListingOutcome;
pub use markup::{escape, TableRow, RECORD_COLUMNS};
pub use register::RegistrationOutcome;
pub use render::{render, Rendered};
pub use surface::{Clipboard, Indicator, RecordTable, TextRegion, Tone, TriggerControl};
pub use upload::UploadInput;
pub use verify::VerificationOutcome;

// Re-export the wire types front ends need.
pub use csr_protocol::{AnchorSnapshot, FileBlob, HttpTransport, RegistryRecord, Transport};
