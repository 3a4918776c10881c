use async_trait::async_trait;

use crate::api::GithubApiClient;
use crate::error::GithubResult;
use crate::types::{ContributorActivity, Issue};

/// Supplies the two feeds the statistics report is built from
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Commit totals per contributor
    async fn contributor_stats(
        &self,
        owner: &str,
        repo: &str,
    ) -> GithubResult<Vec<ContributorActivity>>;

    /// Issues (and pull requests) in any state
    async fn issues(&self, owner: &str, repo: &str) -> GithubResult<Vec<Issue>>;

    /// Source name for logs (e.g., "github", "mock")
    fn source_name(&self) -> String;
}

#[async_trait]
impl ActivitySource for GithubApiClient {
    async fn contributor_stats(
        &self,
        owner: &str,
        repo: &str,
    ) -> GithubResult<Vec<ContributorActivity>> {
        GithubApiClient::contributor_stats(self, owner, repo).await
    }

    async fn issues(&self, owner: &str, repo: &str) -> GithubResult<Vec<Issue>> {
        GithubApiClient::issues(self, owner, repo).await
    }

    fn source_name(&self) -> String {
        "github".to_string()
    }
}
