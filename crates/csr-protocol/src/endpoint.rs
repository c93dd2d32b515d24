/// HTTP endpoint paths of the registry API.
pub mod endpoints {
    pub const HEALTH: &str = "/api/v1/health";
    pub const RECORDS: &str = "/api/v1/records";
    pub const REGISTER: &str = "/api/v1/records/register";
    pub const VERIFY: &str = "/api/v1/records/verify";
    pub const LEDGER_VERIFY: &str = "/api/v1/ledger/verify";
    pub const ANCHOR_LATEST: &str = "/api/v1/anchors/latest";
    pub const PUBLIC_KEY: &str = "/api/v1/keys/public";
}

/// Status literal the backend reports when it is healthy.
pub const HEALTH_OK: &str = "ok";

/// Health check response.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == HEALTH_OK
    }
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: HEALTH_OK.into() }
    }
}
