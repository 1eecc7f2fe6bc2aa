//! # gitem
//!
//! A GitHub REST API client core:
//! - typed endpoint methods over declarative [`CallDescriptor`] tables
//! - response bodies validated against declarative [`ResponseShape`]s,
//!   returning exactly the declared fields
//! - HTTP status codes normalized into a typed [`ApiError`] taxonomy
//! - multi-page listings exposed as one lazy [`Paged`] sequence
//!
//! Calls are synchronous and blocking: one call, one request, one response.
//! There is no caching, no retry, and no internal concurrency; timeout
//! behavior is delegated to the transport.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use gitem::{Client, ClientConfig};
//!
//! fn main() -> Result<(), gitem::ApiError> {
//!     let config = ClientConfig::builder().token("ghp_xxxxxxxxxxxx").build()?;
//!     let client = Client::new(config)?;
//!
//!     let (status, org) = client.get_public_organization("rust-lang")?;
//!     println!("{}: {}", status, org["login"]);
//!
//!     for page in client.get_organizations_public_repositories("rust-lang")? {
//!         let (_, repos) = page?;
//!         for repo in repos.as_array().into_iter().flatten() {
//!             println!("{}", repo["full_name"]);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! The transport is the sole seam for test doubles: implement [`Transport`]
//! or use the recording [`mocks::MockTransport`] with
//! [`Client::with_transport`].

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod schema;

// HTTP transport boundary
pub mod transport;

// Endpoint configuration
pub mod descriptor;
pub mod endpoints;

// Call executors
pub mod client;
pub mod pagination;

// Mocks for testing
pub mod mocks;

// Re-exports for convenience
pub use client::Client;
pub use config::{AccessToken, ClientConfig, ClientConfigBuilder};
pub use descriptor::CallDescriptor;
pub use errors::{classify, ApiError, ApiResult};
pub use pagination::{Paged, PaginationLinks};
pub use schema::{Field, FieldType, ResponseShape, ShapeViolation};
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport, TransportError};
