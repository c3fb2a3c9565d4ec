//! Client for the external driver verification service
//!
//! Driver KYC state is owned by a separate deployment; the admin API only
//! delegates verify/unverify/delete requests to it. This crate provides the
//! service trait, the HTTP client, and an in-memory mock.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod error;
pub mod http;
pub mod mock;
pub mod service;

pub use error::{VerifyError, VerifyResult};
pub use http::HttpVerificationService;
pub use mock::{MockCall, MockVerificationService};
pub use service::{ServiceHealth, VerificationService};
