use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::middleware::auth::Role;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone_number: String,
    pub nearby_warehouse_id: Option<i32>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterSellerRequest {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub gst_number: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}
