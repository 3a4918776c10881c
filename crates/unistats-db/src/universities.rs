use crate::error::DbResult;
use crate::fields::Fields;
use crate::models::{
    AssociationEthnicity, AssociationMajor, City, Enrollment, NewEthnicity, NewMajor,
    NewUniversity, University,
};
use crate::upsert::{self, Insertable};
use sqlx::{Any, Pool};
use tracing::info;

/// Insert a university unconditionally
pub async fn create_university(pool: &Pool<Any>, university: &NewUniversity) -> DbResult<University> {
    let id = upsert::insert::<University>(pool, &university.values()).await?;
    upsert::require(pool, id).await
}

/// Insert a university unless one with identical attributes exists
pub async fn add_university(pool: &Pool<Any>, university: &NewUniversity) -> DbResult<()> {
    upsert::add_unique(pool, university).await
}

/// Get university by ID
pub async fn get_university(pool: &Pool<Any>, university_id: i64) -> DbResult<Option<University>> {
    upsert::get(pool, university_id).await
}

/// First university with the given name
pub async fn find_university_by_name(pool: &Pool<Any>, name: &str) -> DbResult<Option<University>> {
    upsert::find_first(pool, &Fields::new().with("name", name)).await
}

/// List all universities ordered by ID
pub async fn list_universities(pool: &Pool<Any>) -> DbResult<Vec<University>> {
    upsert::find_all(pool, &Fields::new()).await
}

/// The city a university belongs to, if any
pub async fn city(pool: &Pool<Any>, university_id: i64) -> DbResult<Option<City>> {
    let university: University = upsert::require(pool, university_id).await?;
    match university.city_id {
        Some(city_id) => upsert::get(pool, city_id).await,
        None => Ok(None),
    }
}

/// Link a university to the major named `name`, creating the major if needed
///
/// Majors are shared: every university adding "CS" points at the same row,
/// created with the same defaults as any other new major.
/// The association itself is always a new row, so repeated calls with
/// different counts accumulate links.
pub async fn add_major(
    pool: &Pool<Any>,
    university_id: i64,
    name: &str,
    num_students: i64,
) -> DbResult<AssociationMajor> {
    upsert::require::<University>(pool, university_id).await?;
    let major = upsert::find_or_create(pool, &NewMajor::named(name)).await?;

    sqlx::query(
        "INSERT INTO associationmajor (university_id, major_id, num_students) VALUES ($1, $2, $3)",
    )
    .bind(university_id)
    .bind(major.id)
    .bind(num_students)
    .execute(pool)
    .await?;

    info!(
        "Linked university {} to major {} ({} students)",
        university_id, major.name, num_students
    );

    Ok(AssociationMajor {
        university_id,
        major_id: major.id,
        num_students,
    })
}

/// Link a university to the ethnicity named `name`, creating it if needed
pub async fn add_ethnicity(
    pool: &Pool<Any>,
    university_id: i64,
    name: &str,
    num_students: i64,
) -> DbResult<AssociationEthnicity> {
    upsert::require::<University>(pool, university_id).await?;
    let ethnicity = upsert::find_or_create(pool, &NewEthnicity::named(name)).await?;

    sqlx::query(
        "INSERT INTO associationethnicity (university_id, ethnicity_id, num_students) VALUES ($1, $2, $3)",
    )
    .bind(university_id)
    .bind(ethnicity.id)
    .bind(num_students)
    .execute(pool)
    .await?;

    info!(
        "Linked university {} to ethnicity {} ({} students)",
        university_id, ethnicity.name, num_students
    );

    Ok(AssociationEthnicity {
        university_id,
        ethnicity_id: ethnicity.id,
        num_students,
    })
}

/// Association rows from a university to its majors
pub async fn major_associations(
    pool: &Pool<Any>,
    university_id: i64,
) -> DbResult<Vec<AssociationMajor>> {
    let rows = sqlx::query_as::<_, AssociationMajor>(
        "SELECT university_id, major_id, num_students
         FROM associationmajor
         WHERE university_id = $1
         ORDER BY major_id, num_students",
    )
    .bind(university_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Association rows from a university to its ethnicities
pub async fn ethnicity_associations(
    pool: &Pool<Any>,
    university_id: i64,
) -> DbResult<Vec<AssociationEthnicity>> {
    let rows = sqlx::query_as::<_, AssociationEthnicity>(
        "SELECT university_id, ethnicity_id, num_students
         FROM associationethnicity
         WHERE university_id = $1
         ORDER BY ethnicity_id, num_students",
    )
    .bind(university_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Majors offered by a university with their student counts
pub async fn majors(pool: &Pool<Any>, university_id: i64) -> DbResult<Vec<Enrollment>> {
    let rows = sqlx::query_as::<_, Enrollment>(
        "SELECT m.id_num AS id, m.name AS name, a.num_students AS num_students
         FROM associationmajor a
         JOIN MAJOR m ON m.id_num = a.major_id
         WHERE a.university_id = $1
         ORDER BY m.id_num, a.num_students",
    )
    .bind(university_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Ethnicities enrolled at a university with their student counts
pub async fn ethnicities(pool: &Pool<Any>, university_id: i64) -> DbResult<Vec<Enrollment>> {
    let rows = sqlx::query_as::<_, Enrollment>(
        "SELECT e.id_num AS id, e.name AS name, a.num_students AS num_students
         FROM associationethnicity a
         JOIN ETHNICITY e ON e.id_num = a.ethnicity_id
         WHERE a.university_id = $1
         ORDER BY e.id_num, a.num_students",
    )
    .bind(university_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::models::{Ethnicity, Major};
    use crate::pool::run_migrations;
    use sqlx::any::AnyPoolOptions;

    async fn setup_test_db() -> Pool<Any> {
        // Install the SQLite driver for Any
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database pool");

        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    async fn rice(pool: &Pool<Any>) -> University {
        create_university(pool, &NewUniversity::new("Rice", 3900, 60000, 0.93, "Private"))
            .await
            .expect("Failed to create university")
    }

    #[tokio::test]
    async fn test_create_university() {
        let pool = setup_test_db().await;

        let university = rice(&pool).await;

        assert_eq!(university.name, "Rice");
        assert_eq!(university.num_undergrads, Some(3900));
        assert_eq!(university.cost_to_attend, Some(60000));
        assert_eq!(university.grad_rate, Some(0.93));
        assert_eq!(university.public_or_private.as_deref(), Some("Private"));
        assert_eq!(university.city_id, None);
    }

    #[tokio::test]
    async fn test_get_and_find_university() {
        let pool = setup_test_db().await;
        let created = rice(&pool).await;

        let by_id = get_university(&pool, created.id)
            .await
            .expect("Failed to get university")
            .expect("University not found");
        assert_eq!(by_id, created);

        let by_name = find_university_by_name(&pool, "Rice")
            .await
            .expect("Failed to query university")
            .expect("University not found");
        assert_eq!(by_name.id, created.id);

        assert!(get_university(&pool, 999).await.unwrap().is_none());
        assert!(find_university_by_name(&pool, "UT").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_university_deduplicates() {
        let pool = setup_test_db().await;

        let university = NewUniversity::new("UT Austin", 40000, 25000, 0.81, "Public");
        add_university(&pool, &university).await.unwrap();
        add_university(&pool, &university).await.unwrap();

        assert_eq!(list_universities(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_major_shares_major_and_keeps_both_links() {
        let pool = setup_test_db().await;
        let university = rice(&pool).await;

        let first = add_major(&pool, university.id, "CS", 100)
            .await
            .expect("Failed to add major");
        let second = add_major(&pool, university.id, "CS", 50)
            .await
            .expect("Failed to add major");

        assert_eq!(first.major_id, second.major_id);
        assert_eq!(
            upsert::count::<Major>(&pool, &Fields::new().with("name", "CS"))
                .await
                .unwrap(),
            1
        );

        let links = major_associations(&pool, university.id).await.unwrap();
        let counts: Vec<i64> = links.iter().map(|l| l.num_students).collect();
        assert_eq!(counts, vec![50, 100]);
    }

    #[tokio::test]
    async fn test_add_major_shared_across_universities() {
        let pool = setup_test_db().await;
        let rice = rice(&pool).await;
        let ut = create_university(
            &pool,
            &NewUniversity::new("UT Austin", 40000, 25000, 0.81, "Public"),
        )
        .await
        .unwrap();

        let a = add_major(&pool, rice.id, "CS", 100).await.unwrap();
        let b = add_major(&pool, ut.id, "CS", 900).await.unwrap();

        assert_eq!(a.major_id, b.major_id);
    }

    #[tokio::test]
    async fn test_add_major_exact_duplicate_rejected() {
        let pool = setup_test_db().await;
        let university = rice(&pool).await;

        add_major(&pool, university.id, "CS", 100).await.unwrap();
        let result = add_major(&pool, university.id, "CS", 100).await;

        assert!(matches!(result, Err(DbError::SqlxError(_))));
        assert_eq!(major_associations(&pool, university.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_major_unknown_university() {
        let pool = setup_test_db().await;

        let result = add_major(&pool, 7, "CS", 100).await;
        assert!(matches!(result, Err(DbError::RowNotFound("UNIVERSITY", 7))));
    }

    #[tokio::test]
    async fn test_add_ethnicity() {
        let pool = setup_test_db().await;
        let university = rice(&pool).await;

        add_ethnicity(&pool, university.id, "Asian", 800).await.unwrap();
        add_ethnicity(&pool, university.id, "Asian", 750).await.unwrap();
        add_ethnicity(&pool, university.id, "White", 1500).await.unwrap();

        let ethnicity_rows =
            upsert::find_all::<Ethnicity>(&pool, &Fields::new()).await.unwrap();
        assert_eq!(ethnicity_rows.len(), 2);

        let links = ethnicity_associations(&pool, university.id).await.unwrap();
        assert_eq!(links.len(), 3);

        let enrolled = ethnicities(&pool, university.id).await.unwrap();
        let names: Vec<(&str, i64)> = enrolled
            .iter()
            .map(|e| (e.name.as_str(), e.num_students))
            .collect();
        assert_eq!(names, vec![("Asian", 750), ("Asian", 800), ("White", 1500)]);
    }

    #[tokio::test]
    async fn test_add_ethnicity_starts_total_at_zero() {
        let pool = setup_test_db().await;
        let university = rice(&pool).await;

        let link = add_ethnicity(&pool, university.id, "Asian", 10).await.unwrap();

        let ethnicity: Ethnicity = upsert::require(&pool, link.ethnicity_id).await.unwrap();
        assert_eq!(ethnicity.total_count, Some(0));
    }

    #[tokio::test]
    async fn test_majors_view() {
        let pool = setup_test_db().await;
        let university = rice(&pool).await;

        add_major(&pool, university.id, "CS", 100).await.unwrap();
        add_major(&pool, university.id, "Biology", 80).await.unwrap();

        let majors = majors(&pool, university.id).await.unwrap();
        assert_eq!(majors.len(), 2);
        assert_eq!(majors[0].name, "CS");
        assert_eq!(majors[0].num_students, 100);
        assert_eq!(majors[1].name, "Biology");
    }

    #[tokio::test]
    async fn test_city_none_by_default() {
        let pool = setup_test_db().await;
        let university = rice(&pool).await;

        assert!(city(&pool, university.id).await.unwrap().is_none());
    }
}
