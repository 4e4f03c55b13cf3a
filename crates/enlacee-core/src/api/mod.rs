//! REST API client module for the Enlacee backend.
//!
//! This module provides the `ApiClient` for submitting credentials to the
//! backend's login endpoint and decoding the session it issues.

pub mod client;
pub mod error;

pub use client::{ApiClient, LoginResponse};
pub use error::ApiError;
