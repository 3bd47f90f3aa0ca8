use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::models::{Profile, RepositorySummary};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Number of repositories requested per lookup.
pub const REPOS_PER_PAGE: usize = 6;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("user '{handle}' not found")]
    NotFound { handle: String },

    #[error("could not fetch {resource} ({status})")]
    Status {
        resource: &'static str,
        status: StatusCode,
    },

    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Read-only access to the two user endpoints a lookup needs.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn fetch_profile(&self, handle: &str) -> Result<Profile, FetchError>;

    async fn fetch_repositories(&self, handle: &str)
        -> Result<Vec<RepositorySummary>, FetchError>;
}

#[async_trait]
impl<T: UserApi + ?Sized> UserApi for Arc<T> {
    async fn fetch_profile(&self, handle: &str) -> Result<Profile, FetchError> {
        (**self).fetch_profile(handle).await
    }

    async fn fetch_repositories(
        &self,
        handle: &str,
    ) -> Result<Vec<RepositorySummary>, FetchError> {
        (**self).fetch_repositories(handle).await
    }
}

/// Unauthenticated GitHub REST client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: String,
}

impl GitHubClient {
    pub fn new(api_base: impl Into<String>) -> Result<Self, FetchError> {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Ok(Self {
            http: build_client()?,
            api_base,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn user_url(&self, handle: &str) -> String {
        format!("{}/users/{}", self.api_base, encode_path_segment(handle))
    }

    fn repos_url(&self, handle: &str) -> String {
        format!(
            "{}/repos?sort=updated&per_page={REPOS_PER_PAGE}",
            self.user_url(handle)
        )
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!(url, "GET");
        self.http.get(url).send().await.map_err(FetchError::Network)
    }
}

#[async_trait]
impl UserApi for GitHubClient {
    async fn fetch_profile(&self, handle: &str) -> Result<Profile, FetchError> {
        let response = self.get(&self.user_url(handle)).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                handle: handle.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                resource: "user profile",
                status,
            });
        }

        response.json::<Profile>().await.map_err(FetchError::Decode)
    }

    async fn fetch_repositories(
        &self,
        handle: &str,
    ) -> Result<Vec<RepositorySummary>, FetchError> {
        let response = self.get(&self.repos_url(handle)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource: "repositories",
                status,
            });
        }

        let mut repos = response
            .json::<Vec<RepositorySummary>>()
            .await
            .map_err(FetchError::Decode)?;
        repos.truncate(REPOS_PER_PAGE);
        Ok(repos)
    }
}

/// Creates an HTTP client with the headers GitHub expects.
fn build_client() -> Result<Client, FetchError> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("gitview/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(FetchError::Client)
}

/// Percent-encodes a handle so it stays a single path segment.
fn encode_path_segment(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() || "-._~".contains(c) => c.to_string(),
            c => {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{b:02X}"))
                    .collect()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_endpoint_urls() {
        let client = GitHubClient::new("https://api.example.test/").unwrap();
        assert_eq!(client.api_base(), "https://api.example.test");
        assert_eq!(
            client.user_url("octocat"),
            "https://api.example.test/users/octocat"
        );
        assert_eq!(
            client.repos_url("octocat"),
            "https://api.example.test/users/octocat/repos?sort=updated&per_page=6"
        );
    }

    #[test]
    fn handles_cannot_escape_the_path() {
        assert_eq!(encode_path_segment("octo-cat_1.x"), "octo-cat_1.x");
        assert_eq!(encode_path_segment("../admin"), "..%2Fadmin");
        assert_eq!(encode_path_segment("a b?c"), "a%20b%3Fc");
        assert_eq!(encode_path_segment("é"), "%C3%A9");
    }
}
