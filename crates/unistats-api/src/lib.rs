pub mod cities;
pub mod error;
pub mod health;
pub mod state;
pub mod stats;
pub mod universities;

// Re-export commonly used types
pub use cities::{CityDetail, get_city, list_cities};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use health::health;
pub use state::AppState;
pub use stats::github_stats;
pub use universities::{UniversityDetail, get_university, list_universities};
