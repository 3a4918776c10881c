pub mod cities;
pub mod error;
pub mod ethnicities;
pub mod fields;
pub mod majors;
pub mod models;
pub mod pool;
pub mod universities;
pub mod upsert;

// Re-export commonly used types
pub use error::{DbError, DbResult};
pub use fields::{Fields, Value};
pub use models::{
    AssociationEthnicity, AssociationMajor, City, Enrollment, Ethnicity, Major, NewCity,
    NewEthnicity, NewMajor, NewUniversity, University,
};
pub use pool::{Backend, backend, create_pool, run_migrations};
pub use upsert::{Entity, Insertable, add_unique, create_unique, find_or_create};
