use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Row not found: table={0}, id={1}")]
    RowNotFound(&'static str, i64),

    #[error("Migration failed at statement {0}: {1}")]
    MigrationFailed(usize, sqlx::Error),

    #[error("Unsupported database backend: {0}")]
    UnsupportedBackend(String),
}

pub type DbResult<T> = Result<T, DbError>;
