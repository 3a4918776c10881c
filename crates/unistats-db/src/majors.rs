use crate::error::DbResult;
use crate::fields::Fields;
use crate::models::{City, Enrollment, Major};
use crate::upsert;
use sqlx::{Any, Pool};

/// Get major by ID
pub async fn get_major(pool: &Pool<Any>, major_id: i64) -> DbResult<Option<Major>> {
    upsert::get(pool, major_id).await
}

/// First major with the given name
pub async fn find_by_name(pool: &Pool<Any>, name: &str) -> DbResult<Option<Major>> {
    upsert::find_first(pool, &Fields::new().with("name", name)).await
}

/// Every major row with the given name (city-scoped majors may repeat names)
pub async fn list_by_name(pool: &Pool<Any>, name: &str) -> DbResult<Vec<Major>> {
    upsert::find_all(pool, &Fields::new().with("name", name)).await
}

/// Universities offering a major with their student counts
pub async fn universities(pool: &Pool<Any>, major_id: i64) -> DbResult<Vec<Enrollment>> {
    let rows = sqlx::query_as::<_, Enrollment>(
        "SELECT u.id_num AS id, u.name AS name, a.num_students AS num_students
         FROM associationmajor a
         JOIN UNIVERSITY u ON u.id_num = a.university_id
         WHERE a.major_id = $1
         ORDER BY u.id_num, a.num_students",
    )
    .bind(major_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Cities a major is linked to
pub async fn cities(pool: &Pool<Any>, major_id: i64) -> DbResult<Vec<City>> {
    let rows = sqlx::query_as::<_, City>(
        "SELECT c.id_num, c.name, c.population, c.avg_tuition, c.urban_or_rural
         FROM CITY c
         JOIN MAJORTOCITY j ON j.city_id = c.id_num
         WHERE j.major_id = $1
         ORDER BY c.id_num",
    )
    .bind(major_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
