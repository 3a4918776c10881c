use axum::{Json, extract::State};
use tracing::info;
use unistats_core::StatsReport;
use unistats_github::generate_report;

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /githubstats`
///
/// Builds a fresh report on every request; nothing is cached between calls.
/// A config that names no repository fails before GitHub is contacted.
pub async fn github_stats(State(state): State<AppState>) -> ApiResult<Json<StatsReport>> {
    state.report_config.validate()?;
    info!("Generating statistics for {}", state.report_config.slug());

    let report = generate_report(state.activity_source.as_ref(), &state.report_config).await?;
    Ok(Json(report))
}
