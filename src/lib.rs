//! Alibaba Cloud Function Compute (FC) client.
//!
//! Authenticated, type-safe interface for invoking functions on Alibaba
//! Cloud Function Compute.
//!
//! # Features
//!
//! - **Request signing**: HMAC-SHA256 signature over the canonical request,
//!   refreshed per attempt
//! - **Bounded retry**: immediate re-sign and resend on HTTP >= 500 within a
//!   configurable attempt budget
//! - **Typed outcomes**: every call resolves to a success, a classified
//!   client error, or a classified server error
//! - **Credential providers**: static and environment-variable sources, with
//!   secret material protected in memory
//! - **Async/Await**: built on Tokio and reqwest
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use integrations_alicloud_fc::FcClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FcClient::builder()
//!         .region("cn-hangzhou")
//!         .account_id("1234567890")
//!         .credentials("LTAI4ExampleAccessKey", "example-secret")
//!         .build()?;
//!
//!     let response = client
//!         .invoke_function("demo-service", "echo", b"hello".to_vec())
//!         .await?;
//!     println!("{}", response.text());
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Failures are ordinary values, not panics:
//!
//! ```rust,no_run
//! use integrations_alicloud_fc::{FcClient, FcError};
//!
//! # async fn example(client: &FcClient) {
//! match client.invoke_function("demo", "echo", b"hi".to_vec()).await {
//!     Ok(response) => println!("ok: {}", response.text()),
//!     Err(err) if err.is_server_error() => {
//!         // >= 500 after the retry budget was exhausted
//!         eprintln!("service failed: {:?}", err.request_id());
//!     }
//!     Err(err) => eprintln!("call failed: {}", err),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// Module declarations
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod signing;

// Re-export main client types
pub use client::{FcClient, FcClientBuilder, InvocationType, API_VERSION};

// Re-export configuration types
pub use config::{ConfigError, FcConfig, FcConfigBuilder, DEFAULT_MAX_ATTEMPTS};

// Re-export credential types
pub use credentials::{
    CredentialError, CredentialProvider, EnvironmentCredentialProvider, FcCredentials,
    StaticCredentialProvider,
};

// Re-export error types
pub use error::{FcError, FcResult};

// Re-export HTTP types
pub use http::{FcHttpClient, FcRequest, FcResponse, HttpMethod, ReqwestTransport, Transport};

/// Result type alias for FC operations.
pub type Result<T> = std::result::Result<T, FcError>;
