use tracing::{debug, info, warn};
use unistats_core::{ReportBuilder, ReportConfig, StatsReport};

use crate::error::GithubResult;
use crate::source::ActivitySource;

/// Build the contributor statistics report for the configured repository
///
/// Commit totals come first, then every issue counts once toward its
/// reporter, then the configured unit test counts are applied. Contributors
/// first seen in a later feed start from zero, so issues-only contributors
/// and unit-test-only entries are reported rather than rejected.
pub async fn generate_report(
    source: &dyn ActivitySource,
    config: &ReportConfig,
) -> GithubResult<StatsReport> {
    let (owner, repo) = (config.owner.as_str(), config.repo.as_str());
    let mut builder = ReportBuilder::new();

    let contributors = source.contributor_stats(owner, repo).await?;
    for contributor in &contributors {
        match contributor.login() {
            Some(login) => builder.record_commits(login, contributor.total),
            None => warn!(
                "Skipping {} commits with no associated GitHub account",
                contributor.total
            ),
        }
    }

    let issues = source.issues(owner, repo).await?;
    for issue in &issues {
        match issue.login() {
            Some(login) => {
                if !builder.contains(login) {
                    debug!("{} reported issues but has no commits", login);
                }
                builder.record_issue(login);
            }
            None => warn!("Skipping issue {:?} with no reporter", issue.number),
        }
    }

    for (login, count) in &config.unit_tests {
        if !builder.contains(login) {
            warn!(
                "Unit tests configured for {} who is absent from {}/{} activity",
                login, owner, repo
            );
        }
        builder.set_unit_tests(login, *count);
    }

    let report = builder.finish();
    info!(
        "Built {} report for {}/{}: {} contributors, {} commits, {} issues, {} unit tests",
        source.source_name(),
        owner,
        repo,
        report.user_stats.len(),
        report.total_stats.commits,
        report.total_stats.issues,
        report.total_stats.unit_tests
    );

    Ok(report)
}
