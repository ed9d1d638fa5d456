use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Seller;

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SellerList {
    #[schema(value_type = Vec<Seller>)]
    pub items: Vec<Seller>,
}
