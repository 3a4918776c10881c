use crate::error::DbResult;
use crate::fields::Fields;
use crate::models::{City, Enrollment, Ethnicity};
use crate::upsert;
use sqlx::{Any, Pool};

/// Get ethnicity by ID
pub async fn get_ethnicity(pool: &Pool<Any>, ethnicity_id: i64) -> DbResult<Option<Ethnicity>> {
    upsert::get(pool, ethnicity_id).await
}

/// First ethnicity with the given name
pub async fn find_by_name(pool: &Pool<Any>, name: &str) -> DbResult<Option<Ethnicity>> {
    upsert::find_first(pool, &Fields::new().with("name", name)).await
}

/// Every ethnicity row with the given name
pub async fn list_by_name(pool: &Pool<Any>, name: &str) -> DbResult<Vec<Ethnicity>> {
    upsert::find_all(pool, &Fields::new().with("name", name)).await
}

/// Universities enrolling an ethnicity with their student counts
pub async fn universities(pool: &Pool<Any>, ethnicity_id: i64) -> DbResult<Vec<Enrollment>> {
    let rows = sqlx::query_as::<_, Enrollment>(
        "SELECT u.id_num AS id, u.name AS name, a.num_students AS num_students
         FROM associationethnicity a
         JOIN UNIVERSITY u ON u.id_num = a.university_id
         WHERE a.ethnicity_id = $1
         ORDER BY u.id_num, a.num_students",
    )
    .bind(ethnicity_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Cities an ethnicity is linked to
pub async fn cities(pool: &Pool<Any>, ethnicity_id: i64) -> DbResult<Vec<City>> {
    let rows = sqlx::query_as::<_, City>(
        "SELECT c.id_num, c.name, c.population, c.avg_tuition, c.urban_or_rural
         FROM CITY c
         JOIN ETHNICITYTOCITY j ON j.city_id = c.id_num
         WHERE j.ethnicity_id = $1
         ORDER BY c.id_num",
    )
    .bind(ethnicity_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
