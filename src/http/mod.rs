//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! service call
//!     → request.rs (RequestOptions: method, params, body, overrides)
//!     → client.rs (URL, headers, timeout, retry loop)
//!     → error.rs (classify failures) / response.rs (unwrap envelope)
//! ```

pub mod client;
pub mod error;
pub mod request;
pub mod response;

pub use client::HttpClient;
pub use error::{ErrorKind, NetworkError};
pub use request::RequestOptions;
pub use response::Envelope;
