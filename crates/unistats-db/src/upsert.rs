use crate::error::{DbError, DbResult};
use crate::fields::{Fields, bind_values};
use sqlx::any::AnyRow;
use sqlx::{Any, FromRow, Pool};
use tracing::debug;

/// A persisted row type with a surrogate `id_num` key
pub trait Entity: for<'r> FromRow<'r, AnyRow> + Send + Unpin {
    /// Table name
    const TABLE: &'static str;

    /// Select list, starting with `id_num`
    const COLUMNS: &'static str;
}

/// A not-yet-persisted row
pub trait Insertable {
    type Entity: Entity;

    /// Column values written on insert
    fn values(&self) -> Fields;

    /// Projection compared against existing rows to detect a duplicate
    fn attributes(&self) -> Fields;
}

/// First row (lowest key) matching every field exactly
pub async fn find_first<E: Entity>(pool: &Pool<Any>, fields: &Fields) -> DbResult<Option<E>> {
    let sql = format!(
        "SELECT {} FROM {}{} ORDER BY id_num LIMIT 1",
        E::COLUMNS,
        E::TABLE,
        fields.where_clause()
    );

    let row = bind_values(sqlx::query_as::<_, E>(&sql), fields.filter_values())
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// All rows matching every field exactly, ordered by key
pub async fn find_all<E: Entity>(pool: &Pool<Any>, fields: &Fields) -> DbResult<Vec<E>> {
    let sql = format!(
        "SELECT {} FROM {}{} ORDER BY id_num",
        E::COLUMNS,
        E::TABLE,
        fields.where_clause()
    );

    let rows = bind_values(sqlx::query_as::<_, E>(&sql), fields.filter_values())
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Get a row by its key
pub async fn get<E: Entity>(pool: &Pool<Any>, id: i64) -> DbResult<Option<E>> {
    find_first(pool, &Fields::new().with("id_num", id)).await
}

/// Get a row by its key, failing if it does not exist
pub async fn require<E: Entity>(pool: &Pool<Any>, id: i64) -> DbResult<E> {
    get(pool, id)
        .await?
        .ok_or(DbError::RowNotFound(E::TABLE, id))
}

/// Insert a row unconditionally and return its key
pub async fn insert<E: Entity>(pool: &Pool<Any>, fields: &Fields) -> DbResult<i64> {
    let sql = format!("{} RETURNING id_num", fields.insert_clause(E::TABLE));

    let (id,): (i64,) = bind_values(sqlx::query_as(&sql), fields.filter_values())
        .fetch_one(pool)
        .await?;

    debug!("Inserted {} row id={}", E::TABLE, id);
    Ok(id)
}

/// Find a row matching `attributes` exactly, or create one from them
///
/// The lookup and the insert are separate statements: two concurrent
/// callers can both miss and both insert. Ingestion is single-writer.
pub async fn create_unique<E: Entity>(pool: &Pool<Any>, attributes: Fields) -> DbResult<E> {
    if let Some(existing) = find_first::<E>(pool, &attributes).await? {
        return Ok(existing);
    }

    let id = insert::<E>(pool, &attributes).await?;
    require(pool, id).await
}

/// Persist `instance` unless a row with equal attributes already exists
///
/// Nothing is returned: when a duplicate exists the instance is dropped
/// and the existing row stays canonical.
pub async fn add_unique<I: Insertable>(pool: &Pool<Any>, instance: &I) -> DbResult<()> {
    let attributes = instance.attributes();
    if find_first::<I::Entity>(pool, &attributes).await?.is_some() {
        debug!("{} row already present, skipping insert", I::Entity::TABLE);
        return Ok(());
    }

    insert::<I::Entity>(pool, &instance.values()).await?;
    Ok(())
}

/// Row equal to `instance` on its attributes, or a new row from its full values
///
/// Unlike [`create_unique`], a miss inserts every default the new-row type
/// carries, not just the matched attributes.
pub async fn find_or_create<I: Insertable>(pool: &Pool<Any>, instance: &I) -> DbResult<I::Entity> {
    if let Some(existing) = find_first::<I::Entity>(pool, &instance.attributes()).await? {
        return Ok(existing);
    }

    let id = insert::<I::Entity>(pool, &instance.values()).await?;
    require(pool, id).await
}

/// Count rows matching every field exactly
pub async fn count<E: Entity>(pool: &Pool<Any>, fields: &Fields) -> DbResult<i64> {
    let sql = format!(
        "SELECT COUNT(*) FROM {}{}",
        E::TABLE,
        fields.where_clause()
    );

    let (count,): (i64,) = bind_values(sqlx::query_as(&sql), fields.filter_values())
        .fetch_one(pool)
        .await?;

    Ok(count)
}
