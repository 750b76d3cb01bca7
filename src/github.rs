use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use crate::error::{ActiveReposError, Result};
use crate::source::RepoSource;
use crate::types::RepositorySummary;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("active-repos/", env!("CARGO_PKG_VERSION"));

pub struct GitHub {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

// GitHub API response types

#[derive(Deserialize)]
struct GhRepo {
    full_name: String,
    updated_at: DateTime<Utc>,
    stargazers_count: u64,
    forks_count: u64,
    language: Option<String>,
    open_issues_count: u64,
    html_url: String,
}

impl GitHub {
    /// Without a token, requests go out unauthenticated and share the
    /// anonymous rate limit.
    pub fn new(api_base: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ActiveReposError::Api(e.to_string()))?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// `{api_base}/repos/<owner>/<name>`
    pub fn repo_endpoint(&self, full_name: &str) -> String {
        let path = full_name
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/repos/{}", self.api_base, path)
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url).header(ACCEPT, ACCEPT_V3);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {}", token)),
            None => request,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.request(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ActiveReposError::Api(format!("GitHub API {}: {}", status, text)));
        }

        response
            .json()
            .await
            .map_err(|e| ActiveReposError::Api(e.to_string()))
    }
}

fn to_summary(repo: GhRepo, endpoint: &str) -> RepositorySummary {
    RepositorySummary {
        full_name: repo.full_name,
        updated_at: repo.updated_at,
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        language: repo.language,
        open_issues: repo.open_issues_count,
        issues_url: format!("{}/issues", endpoint),
        html_url: repo.html_url,
    }
}

#[async_trait]
impl RepoSource for GitHub {
    fn name(&self) -> &str {
        "GitHub"
    }

    async fn fetch_repo(&self, full_name: &str) -> Result<RepositorySummary> {
        let endpoint = self.repo_endpoint(full_name);
        tracing::debug!(url = %endpoint, "fetching repository");
        let repo: GhRepo = self.get_json(&endpoint).await?;
        Ok(to_summary(repo, &endpoint))
    }
}
