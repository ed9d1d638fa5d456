use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::{
        AppJson,
        catalog::{CreateWarehouseRequest, WarehouseList},
    },
    error::{AppResult, ErrorBody},
    middleware::auth::AuthUser,
    models::Warehouse,
    response::{ApiResponse, Created},
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_warehouses).post(create_warehouse))
}

#[utoipa::path(
    get,
    path = "/api/warehouses",
    responses(
        (status = 200, description = "Active warehouses", body = ApiResponse<WarehouseList>)
    ),
    tag = "Catalog"
)]
pub async fn list_warehouses(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<WarehouseList>>> {
    let resp = catalog_service::list_warehouses(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/warehouses",
    request_body = CreateWarehouseRequest,
    responses(
        (status = 201, description = "Warehouse created", body = ApiResponse<Warehouse>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Unauthenticated", body = ErrorBody),
        (status = 403, description = "Forbidden", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_warehouse(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateWarehouseRequest>,
) -> AppResult<Created<Warehouse>> {
    let resp = catalog_service::create_warehouse(&state, &user, payload).await?;
    Ok(Created(resp))
}
