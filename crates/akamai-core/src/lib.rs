//! # akamai-core
//!
//! Core types and utilities for Akamai API clients.
//!
//! This crate provides the error hierarchy, session configuration and the HTTP
//! execution layer shared by the per-API client crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and structured API errors
//! - [`config`] - Session configuration
//! - [`client`] - HTTP client tuning
//! - [`query`] - Query parameter builder
//! - [`session`] - Request execution (`Executor` trait and the reqwest `Session`)

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod session;

// Re-export commonly used types
pub use error::{ApiError, Error, Result};
pub use session::{Executor, HttpRequest, HttpResponse, Session, SessionBuilder};
