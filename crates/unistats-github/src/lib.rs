pub mod api;
pub mod error;
pub mod mock;
pub mod report;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use api::{Credentials, GithubApiClient};
pub use error::{GithubError, GithubResult};
pub use mock::MockActivitySource;
pub use report::generate_report;
pub use source::ActivitySource;
pub use types::{ContributorActivity, Issue, User};
