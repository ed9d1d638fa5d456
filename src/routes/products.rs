use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::{
        AppJson, AppPath,
        products::{CreateProductRequest, ProductDetail, ProductList, ProductWithVariants},
    },
    error::{AppResult, ErrorBody},
    middleware::auth::VerifiedSeller,
    response::{ApiResponse, Created},
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Latest 50 products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with variants and stock", body = ApiResponse<ProductDetail>),
        (status = 400, description = "Malformed product id", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn get_product(
    AppPath(id): AppPath<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product, variants and inventory created", body = ApiResponse<ProductWithVariants>),
        (status = 400, description = "Invalid input or reference", body = ErrorBody),
        (status = 401, description = "Unauthenticated", body = ErrorBody),
        (status = 403, description = "Not a verified seller", body = ErrorBody),
        (status = 409, description = "Duplicate SKU", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    seller: VerifiedSeller,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> AppResult<Created<ProductWithVariants>> {
    let resp = product_service::create_product(&state, &seller, payload).await?;
    Ok(Created(resp))
}
