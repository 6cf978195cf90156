use crate::ports::outbound::ChangeSource;
use crate::review::domain::RawChange;
use crate::shared::error::ReviewError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;

/// GitHubDependencyGraphClient adapter for the dependency graph compare API
///
/// Fetches the dependency diff between two refs of a repository with a single
/// request. Failed requests are not retried.
///
/// # Security
/// - Repository owner and name are validated before building the URL
/// - Refs are percent-encoded
/// - Requests time out after 30 seconds
pub struct GitHubDependencyGraphClient {
    client: reqwest::Client,
    api_url: String,
    owner: String,
    repo: String,
    base_ref: String,
    head_ref: String,
    token: Option<String>,
}

impl GitHubDependencyGraphClient {
    const API_ENDPOINT: &'static str = "https://api.github.com";
    const TIMEOUT_SECONDS: u64 = 30;
    const MEDIA_TYPE: &'static str = "application/vnd.github+json";

    /// Creates a client for `owner/name` comparing `base_ref...head_ref`
    ///
    /// # Errors
    /// Returns an error if the repository is not in `owner/name` form, a ref
    /// is empty, or the HTTP client cannot be built
    pub fn new(repository: &str, base_ref: &str, head_ref: &str) -> Result<Self> {
        let (owner, repo) = Self::parse_repository(repository)?;
        Self::validate_ref(base_ref, "base ref")?;
        Self::validate_ref(head_ref, "head ref")?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(Self::MEDIA_TYPE));

        let user_agent = format!("dependency-review/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: Self::API_ENDPOINT.to_string(),
            owner,
            repo,
            base_ref: base_ref.to_string(),
            head_ref: head_ref.to_string(),
            token: None,
        })
    }

    /// Uses a different API base URL (GitHub Enterprise Server, tests)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sends the token as a bearer credential; blank tokens are ignored
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    fn parse_repository(repository: &str) -> Result<(String, String)> {
        let invalid = || ReviewError::InvalidConfig {
            message: format!("Invalid repository: '{}'", repository),
            hint: "Use the form OWNER/NAME, e.g. --repo octo-org/octo-repo".to_string(),
        };

        let (owner, repo) = repository.split_once('/').ok_or_else(invalid)?;
        let valid_component = |c: &str| {
            !c.is_empty()
                && c != "."
                && c != ".."
                && c
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'))
        };
        if !valid_component(owner) || !valid_component(repo) {
            return Err(invalid().into());
        }
        Ok((owner.to_string(), repo.to_string()))
    }

    fn validate_ref(git_ref: &str, description: &str) -> Result<()> {
        if git_ref.trim().is_empty() {
            return Err(ReviewError::InvalidConfig {
                message: format!("The {} must not be empty", description),
                hint: "Pass both --base-ref and --head-ref together with --repo".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Compare endpoint for the configured repository and refs
    pub fn compare_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/dependency-graph/compare/{}...{}",
            self.api_url,
            self.owner,
            self.repo,
            urlencoding::encode(&self.base_ref),
            urlencoding::encode(&self.head_ref)
        )
    }

    fn status_hint(status: u16) -> &'static str {
        match status {
            401 => "Set GITHUB_TOKEN to a token that can read the repository",
            403 => "The token lacks access or the rate limit was exceeded; the dependency graph must be enabled for the repository",
            404 => "Check the repository name and that both refs exist",
            _ => "Check the API URL and try again later",
        }
    }
}

#[async_trait]
impl ChangeSource for GitHubDependencyGraphClient {
    async fn fetch_changes(&self) -> Result<Option<Vec<RawChange>>> {
        let url = self.compare_url();

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach the dependency graph API: {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReviewError::ApiError {
                status: status.as_u16(),
                url,
                hint: Self::status_hint(status.as_u16()).to_string(),
            }
            .into());
        }

        let changes = response
            .json::<Option<Vec<RawChange>>>()
            .await
            .with_context(|| format!("Failed to parse dependency graph response from {}", url))?;
        Ok(changes)
    }

    fn describe(&self) -> String {
        format!(
            "{}/{} ({}...{})",
            self.owner, self.repo, self.base_ref, self.head_ref
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_url() {
        let client = GitHubDependencyGraphClient::new("octo-org/octo-repo", "main", "feature").unwrap();
        assert_eq!(
            client.compare_url(),
            "https://api.github.com/repos/octo-org/octo-repo/dependency-graph/compare/main...feature"
        );
    }

    #[test]
    fn test_compare_url_encodes_refs() {
        let client = GitHubDependencyGraphClient::new("octo-org/octo-repo", "refs/heads/main", "a b")
            .unwrap()
            .with_api_url("https://ghe.example.com/api/v3/");
        assert_eq!(
            client.compare_url(),
            "https://ghe.example.com/api/v3/repos/octo-org/octo-repo/dependency-graph/compare/refs%2Fheads%2Fmain...a%20b"
        );
    }

    #[test]
    fn test_invalid_repository() {
        for repository in ["octo-repo", "/repo", "owner/", "../etc/passwd", "owner/repo?x=1"] {
            let err = GitHubDependencyGraphClient::new(repository, "main", "head")
                .err()
                .unwrap();
            assert!(
                err.to_string().contains("Invalid repository"),
                "expected rejection of {}",
                repository
            );
        }
    }

    #[test]
    fn test_empty_ref_rejected() {
        let err = GitHubDependencyGraphClient::new("octo-org/octo-repo", " ", "head")
            .err()
            .unwrap();
        assert!(err.to_string().contains("base ref must not be empty"));
    }

    #[test]
    fn test_blank_token_ignored() {
        let client = GitHubDependencyGraphClient::new("o/r", "a", "b")
            .unwrap()
            .with_token(Some("  ".to_string()));
        assert!(client.token.is_none());
    }

    #[test]
    fn test_describe() {
        let client = GitHubDependencyGraphClient::new("o/r", "a", "b").unwrap();
        assert_eq!(client.describe(), "o/r (a...b)");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_error() {
        let client = GitHubDependencyGraphClient::new("o/r", "a", "b")
            .unwrap()
            .with_api_url("http://127.0.0.1:9");
        assert!(client.fetch_changes().await.is_err());
    }
}
