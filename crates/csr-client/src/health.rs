use csr_protocol::{endpoints, HealthResponse, Transport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HealthStatus {
    Online,
    Offline,
}

impl HealthStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

/// One-shot reachability probe: online iff `200` with `{"status":"ok"}`.
pub async fn probe<T: Transport + ?Sized>(transport: &T) -> HealthStatus {
    let resp = match transport.get(endpoints::HEALTH).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(error = %e, "health probe failed");
            return HealthStatus::Offline;
        }
    };
    if resp.status != 200 {
        tracing::warn!(status = resp.status, "health probe returned unexpected status");
        return HealthStatus::Offline;
    }
    match resp.json::<HealthResponse>() {
        Ok(body) if body.is_ok() => HealthStatus::Online,
        Ok(body) => {
            tracing::warn!(status = %body.status, "backend reports unhealthy");
            HealthStatus::Offline
        }
        Err(e) => {
            tracing::warn!(error = %e, "malformed health body");
            HealthStatus::Offline
        }
    }
}
