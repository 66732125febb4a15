//! HTTP implementation of the Vela API client.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::RepoService;
use crate::error::{Result, VelaError};
use crate::models::Repo;

/// Error body returned by the Vela server.
#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for a Vela server.
#[derive(Debug, Clone)]
pub struct VelaClient {
    base: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl VelaClient {
    /// Creates a client for the server at `addr`.
    ///
    /// The token, when present, is sent as a bearer token on every request.
    pub fn new(addr: &str, token: Option<String>) -> Result<Self> {
        let base = Url::parse(addr)?;
        if base.cannot_be_a_base() {
            return Err(VelaError::InvalidAddress(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        let http = reqwest::Client::builder()
            .user_agent(format!("vela/{}", crate::VERSION))
            .build()?;

        Ok(Self { base, token, http })
    }

    /// Builds `<base>/api/v1/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| VelaError::InvalidAddress(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Turns a non-2xx response into [`VelaError::Api`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => body,
    };

    Err(VelaError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RepoService for VelaClient {
    async fn add(&self, repo: &Repo) -> Result<Repo> {
        let url = self.endpoint(&["repos"])?;
        tracing::debug!("POST {}", url);

        let response = self
            .request(reqwest::Method::POST, url)
            .json(repo)
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn get(&self, org: &str, name: &str) -> Result<Repo> {
        let url = self.endpoint(&["repos", org, name])?;
        tracing::debug!("GET {}", url);

        let response = self.request(reqwest::Method::GET, url).send().await?;

        Ok(check_status(response).await?.json().await?)
    }

    async fn remove(&self, org: &str, name: &str) -> Result<String> {
        let url = self.endpoint(&["repos", org, name])?;
        tracing::debug!("DELETE {}", url);

        let response = self.request(reqwest::Method::DELETE, url).send().await?;
        let body = check_status(response).await?.text().await?;

        // The server answers with a JSON string, but accept plain text too
        Ok(serde_json::from_str::<String>(&body).unwrap_or(body))
    }
}
