use crate::{
    error::{GithubError, GithubResult},
    types::{ContributorActivity, Issue},
};
use octocrab::Octocrab;
use serde::Serialize;
use tracing::info;

/// Largest page size the GitHub REST API accepts
pub const PER_PAGE: u8 = 100;

/// How the client authenticates against GitHub
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// Unauthenticated (low rate limit)
    #[default]
    Anonymous,
    /// Personal access token
    Token(String),
    /// OAuth app client ID and secret, sent as basic auth
    OAuthApp {
        client_id: String,
        client_secret: String,
    },
}

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
}

#[derive(Serialize)]
struct IssueParams {
    state: &'static str,
    per_page: u8,
}

/// GitHub API client for repository statistics
pub struct GithubApiClient {
    client: Octocrab,
}

impl GithubApiClient {
    /// Create new GitHub API client
    ///
    /// # Arguments
    /// * `credentials` - How to authenticate
    /// * `base_uri` - API root override (GitHub Enterprise, or a mock server)
    pub fn new(credentials: Credentials, base_uri: Option<&str>) -> GithubResult<Self> {
        let builder = Octocrab::builder();
        let mut builder = match credentials {
            Credentials::Anonymous => builder,
            Credentials::Token(token) => builder.personal_token(token),
            Credentials::OAuthApp {
                client_id,
                client_secret,
            } => builder.basic_auth(client_id, client_secret),
        };

        if let Some(uri) = base_uri {
            builder = builder.base_uri(uri).map_err(|e| {
                GithubError::ApiError(format!("Invalid GitHub API URL {}: {}", uri, e))
            })?;
        }

        let client = builder.build().map_err(|e| {
            GithubError::ApiError(format!("Failed to create octocrab client: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Fetch per-contributor commit totals
    ///
    /// # Arguments
    /// * `owner` - Repository owner username
    /// * `repo` - Repository name
    pub async fn contributor_stats(
        &self,
        owner: &str,
        repo: &str,
    ) -> GithubResult<Vec<ContributorActivity>> {
        let route = format!("/repos/{}/{}/stats/contributors", owner, repo);
        let params = PageParams { per_page: PER_PAGE };

        let stats: Vec<ContributorActivity> = self
            .client
            .get(&route, Some(&params))
            .await
            .map_err(|e| {
                GithubError::ApiError(format!(
                    "Failed to fetch contributor stats for {}/{}: {}",
                    owner, repo, e
                ))
            })?;

        info!(
            "Fetched commit stats for {} contributors of {}/{}",
            stats.len(),
            owner,
            repo
        );
        Ok(stats)
    }

    /// Fetch the first page of issues in any state (pull requests included)
    ///
    /// # Arguments
    /// * `owner` - Repository owner username
    /// * `repo` - Repository name
    pub async fn issues(&self, owner: &str, repo: &str) -> GithubResult<Vec<Issue>> {
        let route = format!("/repos/{}/{}/issues", owner, repo);
        let params = IssueParams {
            state: "all",
            per_page: PER_PAGE,
        };

        let issues: Vec<Issue> = self
            .client
            .get(&route, Some(&params))
            .await
            .map_err(|e| {
                GithubError::ApiError(format!(
                    "Failed to fetch issues for {}/{}: {}",
                    owner, repo, e
                ))
            })?;

        info!("Fetched {} issues of {}/{}", issues.len(), owner, repo);
        Ok(issues)
    }
}
