use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Duration;
use sea_orm::{ConnectionTrait, EntityTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::Sellers,
    error::{AppError, AppResult},
    services::token_service::TokenService,
    state::AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }

    /// Admin sessions are rarer and get a longer window.
    pub fn token_ttl(&self) -> Duration {
        match self {
            Role::User | Role::Seller => Duration::hours(1),
            Role::Admin => Duration::hours(2),
        }
    }
}

/// Identity established from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub role: Role,
    /// Numeric id for users and sellers, email for the admin.
    pub subject: String,
}

impl AuthUser {
    pub fn seller_id(&self) -> AppResult<i32> {
        if self.role != Role::Seller {
            return Err(AppError::Forbidden("Forbidden: seller only".into()));
        }
        self.subject
            .parse::<i32>()
            .map_err(|_| AppError::Unauthenticated("Invalid identity in token".into()))
    }
}

/// Role gate: allow only if the caller's role is in `allowed`.
pub fn authorize(user: &AuthUser, allowed: &[Role]) -> AppResult<()> {
    if !allowed.contains(&user.role) {
        tracing::warn!(role = user.role.as_str(), subject = %user.subject, "role not permitted");
        return Err(AppError::Forbidden("Forbidden".into()));
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> AppResult<()> {
    authorize(user, &[Role::Admin])
}

/// Re-reads the verification flag; a token minted before verification changed must not
/// be trusted for it. Returns the seller id on success.
pub async fn ensure_verified_seller<C>(conn: &C, user: &AuthUser) -> AppResult<i32>
where
    C: ConnectionTrait,
{
    let seller_id = user.seller_id()?;
    let seller = Sellers::find_by_id(seller_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Seller not found".into()))?;

    if !seller.is_verified {
        tracing::warn!(seller_id, "unverified seller attempted a seller-only action");
        return Err(AppError::Forbidden("Seller not verified".into()));
    }
    Ok(seller_id)
}

impl<S> FromRequestParts<S> for AuthUser
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthenticated("Missing token".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthenticated("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthenticated("Missing token".into()))?;

        let claims = TokenService::from_ref(state).verify(token)?;

        Ok(AuthUser {
            role: claims.role,
            subject: claims.sub,
        })
    }
}

/// A seller that passed authentication, the role gate and a fresh verification check.
/// Handlers that take this extractor never see the body of a caller who fails the gate.
#[derive(Debug, Clone)]
pub struct VerifiedSeller {
    pub user: AuthUser,
    pub seller_id: i32,
}

impl FromRequestParts<AppState> for VerifiedSeller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authorize(&user, &[Role::Seller])?;
        let seller_id = ensure_verified_seller(&state.orm, &user).await?;
        Ok(VerifiedSeller { user, seller_id })
    }
}
