//! Vela API client.
//!
//! [`RepoService`] is the capability the CLI actions depend on;
//! [`VelaClient`] implements it over HTTP.

mod http;

pub use http::VelaClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Repo;

/// Repository endpoints of the Vela API.
#[async_trait]
pub trait RepoService: Send + Sync {
    /// Registers a repository and returns the server's copy of it.
    async fn add(&self, repo: &Repo) -> Result<Repo>;

    /// Fetches a single repository.
    async fn get(&self, org: &str, name: &str) -> Result<Repo>;

    /// Removes a repository, returning the server's confirmation message.
    async fn remove(&self, org: &str, name: &str) -> Result<String>;
}
