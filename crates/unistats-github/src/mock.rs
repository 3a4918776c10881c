use async_trait::async_trait;

use crate::error::{GithubError, GithubResult};
use crate::source::ActivitySource;
use crate::types::{ContributorActivity, Issue, User};

/// Fixed activity feeds for testing
#[derive(Debug, Clone, Default)]
pub struct MockActivitySource {
    contributors: Vec<ContributorActivity>,
    issues: Vec<Issue>,
    failure: Option<String>,
}

impl MockActivitySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse both feeds from raw GitHub JSON responses
    pub fn from_json(contributors: &str, issues: &str) -> GithubResult<Self> {
        Ok(Self {
            contributors: serde_json::from_str(contributors)?,
            issues: serde_json::from_str(issues)?,
            failure: None,
        })
    }

    /// A source whose every call fails with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Add a contributor with a commit total
    pub fn with_commits(mut self, login: &str, total: u64) -> Self {
        self.contributors.push(ContributorActivity {
            author: Some(user(login)),
            total,
        });
        self
    }

    /// Add an issue reported by `login`
    pub fn with_issue(mut self, login: &str) -> Self {
        let number = self.issues.len() as u64 + 1;
        self.issues.push(Issue {
            number: Some(number),
            user: Some(user(login)),
        });
        self
    }

    fn check(&self) -> GithubResult<()> {
        match &self.failure {
            Some(message) => Err(GithubError::ApiError(message.clone())),
            None => Ok(()),
        }
    }
}

fn user(login: &str) -> User {
    User {
        login: login.to_string(),
        id: None,
    }
}

#[async_trait]
impl ActivitySource for MockActivitySource {
    async fn contributor_stats(
        &self,
        _owner: &str,
        _repo: &str,
    ) -> GithubResult<Vec<ContributorActivity>> {
        self.check()?;
        Ok(self.contributors.clone())
    }

    async fn issues(&self, _owner: &str, _repo: &str) -> GithubResult<Vec<Issue>> {
        self.check()?;
        Ok(self.issues.clone())
    }

    fn source_name(&self) -> String {
        "mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builder_methods() {
        let source = MockActivitySource::new()
            .with_commits("a", 5)
            .with_issue("a")
            .with_issue("b");

        let stats = source.contributor_stats("o", "r").await.unwrap();
        assert_eq!(stats[0].login(), Some("a"));

        let issues = source.issues("o", "r").await.unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1].number, Some(2));
    }

    #[test]
    fn test_from_json_invalid() {
        let result = MockActivitySource::from_json("not json", "[]");
        assert!(matches!(result, Err(GithubError::JsonError(_))));
    }

    #[tokio::test]
    async fn test_failing_source() {
        let source = MockActivitySource::failing("rate limited");
        assert!(source.contributor_stats("o", "r").await.is_err());
        assert!(source.issues("o", "r").await.is_err());
    }
}
