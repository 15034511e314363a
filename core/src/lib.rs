//! Blocking API client for the Signicat electronic-signature service.
//!
//! # Overview
//! Create a signing document, poll its status, retrieve the signed file.
//! `SignicatClient` builds `HttpRequest` values, runs them through a
//! caller-supplied `Transport`, and decodes the responses into typed records.
//!
//! # Design
//! - The client holds only immutable configuration (base URL and transport).
//! - Authentication, TLS, timeouts and retries belong to the transport; the
//!   client never sets auth headers. `UreqTransport` (feature `ureq`) is the
//!   default implementation and can attach a bearer token.
//! - Endpoint groups such as `Signature` borrow the shared client.
//! - Every `Signature` operation has a `build_*` counterpart so requests can
//!   be inspected or executed by the host.
//! - Enumerated API strings are closed Rust enums; unknown values are
//!   rejected at decode time.
//!
//! ```no_run
//! # #[cfg(feature = "ureq")]
//! # fn main() -> signicat_core::Result<()> {
//! use signicat_core::{ClientConfig, FileFormat, SignicatClient, UreqTransport};
//!
//! let transport = UreqTransport::new().with_bearer_token("access-token");
//! let client = SignicatClient::from_config(transport, &ClientConfig::from_env())?;
//!
//! let status = client.signature().retrieve_document_status("document-id")?;
//! if status.is_terminal() {
//!     let mut file = std::fs::File::create("signed.pdf")?;
//!     client
//!         .signature()
//!         .retrieve_file("document-id", FileFormat::Pades, true, &mut file)?;
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "ureq"))]
//! # fn main() {}
//! ```

pub mod client;
pub mod config;
pub mod enums;
pub mod error;
pub mod http;
pub mod signature;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::SignicatClient;
pub use config::ClientConfig;
pub use enums::{
    AuthMechanism, DocumentStatus, FileFormat, Language, Mechanism, NotificationSetup,
    PersonalInfoOrigin, RedirectMode, SignatureMethod, UnknownVariant,
};
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
#[cfg(feature = "ureq")]
pub use http::UreqTransport;
pub use signature::Signature;
pub use types::*;
