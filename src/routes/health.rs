use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorBody},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct DbHealthData {
    pub status: String,
    pub time: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    get,
    path = "/health/db",
    responses(
        (status = 200, description = "Database reachable", body = ApiResponse<DbHealthData>),
        (status = 500, description = "Database unreachable", body = ErrorBody),
    ),
    tag = "Health"
)]
pub async fn db_health_check(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DbHealthData>>> {
    let (time,): (DateTime<Utc>,) = sqlx::query_as("SELECT now()")
        .fetch_one(&state.pool)
        .await?;

    Ok(Json(ApiResponse::success(
        "Database connected",
        DbHealthData {
            status: "ok".to_string(),
            time,
        },
        Some(Meta::empty()),
    )))
}
