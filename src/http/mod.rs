//! HTTP layer for the Function Compute client.
//!
//! # Components
//!
//! - **request** - Immutable, type-safe request building
//! - **response** - Response snapshot and terminal error classification
//! - **transport** - Pluggable transport abstraction over reqwest
//! - **client** - The signed dispatch loop with bounded retry

mod client;
mod request;
mod response;
mod transport;

pub use client::{FcHttpClient, DEFAULT_USER_AGENT};
pub use request::{FcRequest, HttpMethod};
pub use response::{FcResponse, REQUEST_ID_HEADER};
pub use transport::{ReqwestTransport, Transport};
