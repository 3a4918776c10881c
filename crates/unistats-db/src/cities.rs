use crate::error::{DbError, DbResult};
use crate::fields::Fields;
use crate::models::{City, Ethnicity, Major, NewCity, NewEthnicity, NewMajor, University};
use crate::upsert::{self, Entity, Insertable};
use sqlx::{Any, Pool};
use tracing::info;

/// Insert a city unconditionally
pub async fn create_city(pool: &Pool<Any>, city: &NewCity) -> DbResult<City> {
    let id = upsert::insert::<City>(pool, &city.values()).await?;
    upsert::require(pool, id).await
}

/// City named `name`, created with zeroed aggregates if missing
pub async fn find_or_create_city(pool: &Pool<Any>, name: &str) -> DbResult<City> {
    upsert::find_or_create(pool, &NewCity::named(name)).await
}

/// Get city by ID
pub async fn get_city(pool: &Pool<Any>, city_id: i64) -> DbResult<Option<City>> {
    upsert::get(pool, city_id).await
}

/// List all cities ordered by ID
pub async fn list_cities(pool: &Pool<Any>) -> DbResult<Vec<City>> {
    upsert::find_all(pool, &Fields::new()).await
}

/// Attach a university to a city, replacing any previous city
pub async fn add_university(pool: &Pool<Any>, city_id: i64, university_id: i64) -> DbResult<()> {
    upsert::require::<City>(pool, city_id).await?;

    let result = sqlx::query("UPDATE UNIVERSITY SET city_id = $1 WHERE id_num = $2")
        .bind(city_id)
        .bind(university_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::RowNotFound(University::TABLE, university_id));
    }

    info!("Attached university {} to city {}", university_id, city_id);
    Ok(())
}

/// Universities located in a city
pub async fn universities(pool: &Pool<Any>, city_id: i64) -> DbResult<Vec<University>> {
    upsert::find_all(pool, &Fields::new().with("city_id", city_id)).await
}

/// Create a new major and link it to the city
///
/// Unlike `universities::add_major`, this never reuses an existing major:
/// each call records a fresh per-city major row, so the same name added
/// twice yields two rows.
pub async fn add_major(pool: &Pool<Any>, city_id: i64, name: &str) -> DbResult<Major> {
    upsert::require::<City>(pool, city_id).await?;
    let major_id = upsert::insert::<Major>(pool, &NewMajor::named(name).values()).await?;

    sqlx::query("INSERT INTO MAJORTOCITY (city_id, major_id) VALUES ($1, $2)")
        .bind(city_id)
        .bind(major_id)
        .execute(pool)
        .await?;

    info!("Added major {} (id={}) to city {}", name, major_id, city_id);
    upsert::require(pool, major_id).await
}

/// Create a new ethnicity and link it to the city (never reuses an existing row)
pub async fn add_ethnicity(pool: &Pool<Any>, city_id: i64, name: &str) -> DbResult<Ethnicity> {
    upsert::require::<City>(pool, city_id).await?;
    let ethnicity_id =
        upsert::insert::<Ethnicity>(pool, &NewEthnicity::named(name).values()).await?;

    sqlx::query("INSERT INTO ETHNICITYTOCITY (city_id, ethnicity_id) VALUES ($1, $2)")
        .bind(city_id)
        .bind(ethnicity_id)
        .execute(pool)
        .await?;

    info!(
        "Added ethnicity {} (id={}) to city {}",
        name, ethnicity_id, city_id
    );
    upsert::require(pool, ethnicity_id).await
}

/// Majors linked to a city
pub async fn majors(pool: &Pool<Any>, city_id: i64) -> DbResult<Vec<Major>> {
    let rows = sqlx::query_as::<_, Major>(
        "SELECT m.id_num, m.name, m.num_undergrads, m.top_city, m.avg_percentage
         FROM MAJOR m
         JOIN MAJORTOCITY j ON j.major_id = m.id_num
         WHERE j.city_id = $1
         ORDER BY m.id_num",
    )
    .bind(city_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Ethnicities linked to a city
pub async fn ethnicities(pool: &Pool<Any>, city_id: i64) -> DbResult<Vec<Ethnicity>> {
    let rows = sqlx::query_as::<_, Ethnicity>(
        "SELECT e.id_num, e.name, e.total_count
         FROM ETHNICITY e
         JOIN ETHNICITYTOCITY j ON j.ethnicity_id = e.id_num
         WHERE j.city_id = $1
         ORDER BY e.id_num",
    )
    .bind(city_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
