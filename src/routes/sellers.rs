use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::{
        AppJson,
        auth::{LoginRequest, LoginResponse, RegisterSellerRequest},
    },
    error::{AppResult, ErrorBody},
    models::Seller,
    response::{ApiResponse, Created},
    services::auth_service::{login_seller, register_seller},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/api/sellers/register",
    request_body = RegisterSellerRequest,
    responses(
        (status = 201, description = "Register seller (unverified)", body = ApiResponse<Seller>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Email already taken", body = ErrorBody)
    ),
    tag = "Sellers"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterSellerRequest>,
) -> AppResult<Created<Seller>> {
    let resp = register_seller(&state, payload).await?;
    Ok(Created(resp))
}

#[utoipa::path(
    post,
    path = "/api/sellers/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login seller", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 403, description = "Seller not verified", body = ErrorBody)
    ),
    tag = "Sellers"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = login_seller(&state, payload).await?;
    Ok(Json(resp))
}
