//! Vela Core Library
//!
//! Shared types and the HTTP API client for the Vela CI/CD command-line tools.

pub mod client;
pub mod error;
pub mod models;

pub use client::{RepoService, VelaClient};
pub use error::{Result, VelaError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
