use sqlx::{Any, Pool};
use std::sync::Arc;
use unistats_core::ReportConfig;
use unistats_github::ActivitySource;

/// Application state for Axum dependency injection
///
/// Shared by every handler:
/// - Database connection pool holding the university data
/// - Source of repository activity for the statistics report
/// - Which repository to report on and its unit test table
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: Pool<Any>,

    /// Repository activity feed (GitHub in production, a mock in tests)
    pub activity_source: Arc<dyn ActivitySource>,

    /// Report configuration
    pub report_config: Arc<ReportConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        db_pool: Pool<Any>,
        activity_source: Arc<dyn ActivitySource>,
        report_config: ReportConfig,
    ) -> Self {
        Self {
            db_pool,
            activity_source,
            report_config: Arc::new(report_config),
        }
    }
}
