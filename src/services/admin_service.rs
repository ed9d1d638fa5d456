use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    audit::{self, Actor},
    dto::admin::SellerList,
    entity::sellers::{ActiveModel as SellerActive, Column as SellerCol, Entity as Sellers},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Seller,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_pending_sellers(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<SellerList>> {
    ensure_admin(user)?;

    let items: Vec<Seller> = Sellers::find()
        .filter(SellerCol::IsVerified.eq(false))
        .order_by_desc(SellerCol::SellerId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Seller::from)
        .collect();

    let meta = Meta::listing(items.len(), None);
    Ok(ApiResponse::success(
        "Pending sellers",
        SellerList { items },
        Some(meta),
    ))
}

/// Flips the verification flag. Verifying an already verified seller succeeds unchanged.
pub async fn verify_seller(
    state: &AppState,
    user: &AuthUser,
    seller_id: i32,
) -> AppResult<ApiResponse<Seller>> {
    ensure_admin(user)?;

    let seller = Sellers::find_by_id(seller_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Seller not found".into()))?;

    if seller.is_verified {
        return Ok(ApiResponse::success(
            "Seller already verified",
            Seller::from(seller),
            Some(Meta::empty()),
        ));
    }

    let mut active: SellerActive = seller.into();
    active.is_verified = Set(true);
    let seller = active.update(&state.orm).await?;

    tracing::info!(seller_id, "seller verified");
    audit::record(
        &state.pool,
        Actor::from(user),
        "seller_verify",
        "sellers",
        serde_json::json!({ "seller_id": seller_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Seller verified",
        Seller::from(seller),
        Some(Meta::empty()),
    ))
}
