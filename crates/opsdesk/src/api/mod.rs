//! HTTP access to the backend API.
//!
//! One reqwest client, one error taxonomy, one normalization point for the
//! backend's list payload shapes. Registries depend on the [`ApiTransport`]
//! trait rather than the concrete client so they can be exercised against an
//! in-memory transport in tests.

pub mod client;
pub mod error;
pub mod response;

pub use client::{ApiClient, ApiTransport, TokenProvider};
pub use error::{ApiError, Result};
pub use response::{parse_list, ListPayload};
