pub mod config;
pub mod error;
pub mod report;

// Re-export commonly used types
pub use config::{ReportConfig, ServerConfig, default_unit_tests};
pub use error::{CoreError, CoreResult};
pub use report::{ContributorStats, ReportBuilder, StatsReport};
