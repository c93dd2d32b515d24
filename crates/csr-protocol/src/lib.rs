//! Wire protocol for the Checksum Registry.
//!
//! Defines the endpoint paths, the JSON bodies exchanged with the registry
//! backend, and the `Transport` boundary the client flows are written
//! against. `HttpTransport` is the production implementation over reqwest.

pub mod endpoint;
pub mod error;
pub mod http;
pub mod message;
pub mod transport;

pub use endpoint::{endpoints, HealthResponse, HEALTH_OK};
pub use error::{ProtocolError, ProtocolResult};
pub use http::HttpTransport;
pub use message::{
    api_error_message, AnchorSnapshot, ErrorBody, ErrorDetail, LedgerFault, LedgerVerification,
    PublicKeyResponse, RecordList, RegisterResponse, RegistryRecord, VerifyChecks,
    VerifyResponse,
};
pub use transport::{FileBlob, HttpResponse, Transport, UploadForm};
