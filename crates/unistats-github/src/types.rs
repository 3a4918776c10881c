use serde::{Deserialize, Serialize};

/// GitHub user information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub id: Option<i64>,
}

/// One entry of `GET /repos/{owner}/{repo}/stats/contributors`
///
/// Weekly breakdowns are ignored; only the total commit count is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorActivity {
    /// Null for commits by accounts that no longer exist
    pub author: Option<User>,
    pub total: u64,
}

/// One entry of `GET /repos/{owner}/{repo}/issues`
///
/// The issues endpoint also returns pull requests; both are counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: Option<u64>,
    pub user: Option<User>,
}

impl ContributorActivity {
    pub fn login(&self) -> Option<&str> {
        self.author.as_ref().map(|u| u.login.as_str())
    }
}

impl Issue {
    pub fn login(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}
