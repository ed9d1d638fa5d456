use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod categories;
pub mod doc;
pub mod health;
pub mod products;
pub mod sellers;
pub mod users;
pub mod warehouses;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/sellers", sellers::router())
        .nest("/admin", admin::router())
        .nest("/categories", categories::router())
        .nest("/warehouses", warehouses::router())
        .nest("/products", products::router())
}
