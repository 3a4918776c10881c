use crate::error::{DbError, DbResult};
use sqlx::{Any, Executor, Pool, any::AnyPoolOptions};
use tracing::info;

const SQLITE_MIGRATION: &str = include_str!("../migrations/sqlite/001_initial.sql");
const POSTGRES_MIGRATION: &str = include_str!("../migrations/postgres/001_initial.sql");

/// SQL dialect behind an `Any` pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    /// Map a driver name as reported by `AnyConnection::backend_name`
    pub fn from_name(name: &str) -> DbResult<Self> {
        match name {
            "SQLite" => Ok(Backend::Sqlite),
            "PostgreSQL" => Ok(Backend::Postgres),
            other => Err(DbError::UnsupportedBackend(other.to_string())),
        }
    }

    fn migration(self) -> &'static str {
        match self {
            Backend::Sqlite => SQLITE_MIGRATION,
            Backend::Postgres => POSTGRES_MIGRATION,
        }
    }
}

/// Create a database pool from a connection string
///
/// SQLite connections get foreign key enforcement as they are opened; the
/// pragma is per connection, so setting it once is not enough.
pub async fn create_pool(database_url: &str, max_connections: u32) -> DbResult<Pool<Any>> {
    let pool = AnyPoolOptions::new()
        .max_connections(max_connections)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                if conn.backend_name() == "SQLite" {
                    conn.execute("PRAGMA foreign_keys = ON").await?;
                }
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Dialect of the database behind `pool`
pub async fn backend(pool: &Pool<Any>) -> DbResult<Backend> {
    let conn = pool.acquire().await?;
    Backend::from_name(conn.backend_name())
}

/// Split a migration script into individual statements
///
/// Comment lines are dropped; statements are separated by `;`.
fn statements(script: &str) -> Vec<String> {
    let without_comments: String = script
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Create the schema for the pool's dialect (idempotent)
pub async fn run_migrations(pool: &Pool<Any>) -> DbResult<()> {
    let backend = backend(pool).await?;

    if backend == Backend::Sqlite {
        // Pools not built by create_pool skip the connect hook
        sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;
    }

    let statements = statements(backend.migration());
    for (index, statement) in statements.iter().enumerate() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DbError::MigrationFailed(index + 1, e))?;
    }

    info!(
        "Applied {} schema statements ({:?})",
        statements.len(),
        backend
    );
    Ok(())
}
