use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Per-contributor tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStats {
    pub commits: u64,
    pub issues: u64,
    pub unit_tests: u64,
}

impl AddAssign<&ContributorStats> for ContributorStats {
    fn add_assign(&mut self, other: &ContributorStats) {
        self.commits += other.commits;
        self.issues += other.issues;
        self.unit_tests += other.unit_tests;
    }
}

/// Contributor statistics report served on `/githubstats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    pub user_stats: BTreeMap<String, ContributorStats>,
    pub total_stats: ContributorStats,
}

/// Accumulates commit, issue and unit test counts per contributor
///
/// Every recording method creates the contributor with zeroed counts on
/// first sight, so the order in which feeds are applied never matters for
/// which contributors appear.
///
/// # Examples
///
/// ```
/// use unistats_core::report::{ContributorStats, ReportBuilder};
///
/// let mut builder = ReportBuilder::new();
/// builder.record_commits("a", 5);
/// builder.record_issue("a");
/// builder.record_issue("b");
/// let report = builder.finish();
///
/// assert_eq!(
///     report.user_stats["a"],
///     ContributorStats { commits: 5, issues: 1, unit_tests: 0 }
/// );
/// assert_eq!(
///     report.user_stats["b"],
///     ContributorStats { commits: 0, issues: 1, unit_tests: 0 }
/// );
/// assert_eq!(report.total_stats.issues, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    users: BTreeMap<String, ContributorStats>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, login: &str) -> &mut ContributorStats {
        self.users.entry(login.to_string()).or_default()
    }

    /// Whether the contributor has been seen by any feed
    pub fn contains(&self, login: &str) -> bool {
        self.users.contains_key(login)
    }

    /// Set the commit total for a contributor (a repeated login overwrites)
    pub fn record_commits(&mut self, login: &str, total: u64) {
        self.entry(login).commits = total;
    }

    /// Count one issue reported by the contributor
    pub fn record_issue(&mut self, login: &str) {
        self.entry(login).issues += 1;
    }

    /// Set the unit test count for a contributor
    pub fn set_unit_tests(&mut self, login: &str, count: u64) {
        self.entry(login).unit_tests = count;
    }

    /// Compute totals and produce the report
    pub fn finish(self) -> StatsReport {
        let mut total_stats = ContributorStats::default();
        for stats in self.users.values() {
            total_stats += stats;
        }

        StatsReport {
            user_stats: self.users,
            total_stats,
        }
    }
}
