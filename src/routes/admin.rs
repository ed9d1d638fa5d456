use axum::{
    Json, Router,
    extract::State,
    routing::{get, patch, post},
};

use crate::{
    dto::{
        AppJson, AppPath,
        admin::SellerList,
        auth::{LoginRequest, LoginResponse},
    },
    error::{AppResult, ErrorBody},
    middleware::auth::AuthUser,
    models::Seller,
    response::ApiResponse,
    services::{admin_service, auth_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_login))
        .route("/sellers/pending", get(list_pending_sellers))
        .route("/sellers/{id}/verify", patch(verify_seller))
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Admin token (2h)", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Missing fields", body = ErrorBody),
        (status = 401, description = "Invalid admin credentials", body = ErrorBody)
    ),
    tag = "Admin"
)]
pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login_admin(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/sellers/pending",
    responses(
        (status = 200, description = "Sellers awaiting verification", body = ApiResponse<SellerList>),
        (status = 401, description = "Unauthenticated", body = ErrorBody),
        (status = 403, description = "Forbidden", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_pending_sellers(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SellerList>>> {
    let resp = admin_service::list_pending_sellers(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/sellers/{id}/verify",
    params(
        ("id" = i32, Path, description = "Seller ID")
    ),
    responses(
        (status = 200, description = "Seller verified", body = ApiResponse<Seller>),
        (status = 400, description = "Malformed seller id", body = ErrorBody),
        (status = 401, description = "Unauthenticated", body = ErrorBody),
        (status = 403, description = "Forbidden", body = ErrorBody),
        (status = 404, description = "Seller not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn verify_seller(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<ApiResponse<Seller>>> {
    let resp = admin_service::verify_seller(&state, &user, id).await?;
    Ok(Json(resp))
}
