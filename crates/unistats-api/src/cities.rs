use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use unistats_db::{City, Ethnicity, Major, University, cities};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// A city with its universities and per-city majors and ethnicities
#[derive(Debug, Serialize, Deserialize)]
pub struct CityDetail {
    #[serde(flatten)]
    pub city: City,
    pub universities: Vec<University>,
    pub majors: Vec<Major>,
    pub ethnicities: Vec<Ethnicity>,
}

/// `GET /api/cities`
pub async fn list_cities(State(state): State<AppState>) -> ApiResult<Json<Vec<City>>> {
    let rows = cities::list_cities(&state.db_pool).await?;
    Ok(Json(rows))
}

/// `GET /api/cities/{id}`
pub async fn get_city(
    State(state): State<AppState>,
    Path(city_id): Path<i64>,
) -> ApiResult<Json<CityDetail>> {
    let pool = &state.db_pool;
    let city = cities::get_city(pool, city_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("City {} does not exist", city_id)))?;

    let universities = cities::universities(pool, city.id).await?;
    let majors = cities::majors(pool, city.id).await?;
    let ethnicities = cities::ethnicities(pool, city.id).await?;

    Ok(Json(CityDetail {
        city,
        universities,
        majors,
        ethnicities,
    }))
}
