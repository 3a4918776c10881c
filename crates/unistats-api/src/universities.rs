use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use unistats_db::{City, Enrollment, University, universities};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// A university with everything linked to it
#[derive(Debug, Serialize, Deserialize)]
pub struct UniversityDetail {
    #[serde(flatten)]
    pub university: University,
    pub city: Option<City>,
    pub majors: Vec<Enrollment>,
    pub ethnicities: Vec<Enrollment>,
}

/// `GET /api/universities`
pub async fn list_universities(State(state): State<AppState>) -> ApiResult<Json<Vec<University>>> {
    let rows = universities::list_universities(&state.db_pool).await?;
    Ok(Json(rows))
}

/// `GET /api/universities/{id}`
pub async fn get_university(
    State(state): State<AppState>,
    Path(university_id): Path<i64>,
) -> ApiResult<Json<UniversityDetail>> {
    let pool = &state.db_pool;
    let university = universities::get_university(pool, university_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("University {} does not exist", university_id)))?;

    let city = universities::city(pool, university.id).await?;
    let majors = universities::majors(pool, university.id).await?;
    let ethnicities = universities::ethnicities(pool, university.id).await?;

    Ok(Json(UniversityDetail {
        university,
        city,
        majors,
        ethnicities,
    }))
}
