//! # API gRPC
//!
//! gRPC server implementation for MediAssist.
//!
//! Handles:
//! - gRPC service setup and API-key authentication
//! - Service implementations using `mediassist-core`
//! - gRPC-specific concerns (interceptors, status mapping, tonic integration)
//!
//! Uses `api-shared` for common types and utilities.

#![warn(rust_2018_idioms)]

pub use service::{pb, status_from_error, ApiKeyInterceptor, MediAssistService};

pub mod service;
