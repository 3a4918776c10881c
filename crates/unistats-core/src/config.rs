use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unit test counts credited to each team member
///
/// GitHub has no notion of unit tests, so these are maintained by hand.
pub fn default_unit_tests() -> BTreeMap<String, u64> {
    [
        ("mjvolk", 23),
        ("jymin94", 14),
        ("ace-jc", 12),
        ("mxavier6", 33),
        ("budang", 19),
        ("ninean", 13),
    ]
    .into_iter()
    .map(|(login, count)| (login.to_string(), count))
    .collect()
}

fn default_owner() -> String {
    "cs373gc-fall-2016".to_string()
}

fn default_repo() -> String {
    "SouthernWholesomeEducation".to_string()
}

/// Configuration for the GitHub statistics report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Repository owner (user or organization)
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Repository name
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Unit test counts keyed by GitHub login
    #[serde(default = "default_unit_tests")]
    pub unit_tests: BTreeMap<String, u64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            unit_tests: default_unit_tests(),
        }
    }
}

impl ReportConfig {
    /// Build a config for an `owner/repo` slug with the default unit test table
    pub fn for_slug(slug: &str) -> CoreResult<Self> {
        let (owner, repo) = slug
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| CoreError::InvalidRepository(slug.to_string()))?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            ..Self::default()
        })
    }

    /// `owner/repo`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Reject configs that cannot address a repository
    pub fn validate(&self) -> CoreResult<()> {
        if self.owner.trim().is_empty() || self.repo.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "report.owner and report.repo must be set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}
