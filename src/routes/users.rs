use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::{
        AppJson,
        auth::{LoginRequest, LoginResponse, RegisterUserRequest},
    },
    error::{AppResult, ErrorBody},
    models::User,
    response::{ApiResponse, Created},
    services::auth_service::{login_user, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Register customer", body = ApiResponse<User>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Email already taken", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterUserRequest>,
) -> AppResult<Created<User>> {
    let resp = register_user(&state, payload).await?;
    Ok(Created(resp))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login customer", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = login_user(&state, payload).await?;
    Ok(Json(resp))
}
