use serde::{Deserialize, Serialize};

/// `201` body of a successful registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub index: u64,
    pub name: String,
    pub version: String,
    pub sha256: String,
    #[serde(default)]
    pub file_size_bytes: Option<u64>,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub timestamp_utc: Option<String>,
    #[serde(default)]
    pub signing_key_id: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

/// `200` body of a successful verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub name: String,
    pub version: String,
    pub sha256: String,
    /// Criterion the server used to decide the match; displayed verbatim.
    pub match_mode: String,
    #[serde(default)]
    pub matched: Option<bool>,
    #[serde(default)]
    pub index: Option<u64>,
    #[serde(default)]
    pub timestamp_utc: Option<String>,
    #[serde(default)]
    pub signing_key_id: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

/// One row of the registry as served by `GET /api/v1/records`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    pub index: u64,
    pub timestamp_utc: String,
    pub name: String,
    pub version: String,
    pub sha256: String,
    pub file_size_bytes: u64,
    pub original_filename: String,
    #[serde(default)]
    pub signing_key_id: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordList {
    pub count: u64,
    pub items: Vec<RegistryRecord>,
}

/// Individual checks reported by a ledger verification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyChecks {
    #[serde(default)]
    pub chain_integrity_valid: Option<bool>,
    #[serde(default)]
    pub signature_valid: Option<bool>,
}

/// First offending block reported by a failed ledger verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFault {
    #[serde(default)]
    pub index: Option<u64>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Body of `POST /api/v1/ledger/verify`, both for `200` and `409`.
///
/// `valid` and `checks.signature_valid` are independent fields; no
/// correlation between them is assumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerVerification {
    pub valid: bool,
    #[serde(default)]
    pub checked_blocks: Option<u64>,
    #[serde(default)]
    pub checks: Option<VerifyChecks>,
    #[serde(default)]
    pub error: Option<LedgerFault>,
}

impl LedgerVerification {
    /// The signature check as received; `None` when the body carries no checks.
    pub fn signature_valid(&self) -> Option<bool> {
        self.checks.as_ref().and_then(|c| c.signature_valid)
    }
}

/// Latest ledger tip, suitable for external audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorSnapshot {
    pub latest_index: u64,
    pub block_hash: String,
    pub signature: String,
    #[serde(default)]
    pub timestamp_utc: Option<String>,
    #[serde(default)]
    pub signing_key_id: Option<String>,
    #[serde(default)]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub ledger_path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyResponse {
    pub key_id: String,
    pub public_key_pem: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

/// Generic error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Extract `error.message` from a raw body if it has the generic error shape.
pub fn api_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
}
