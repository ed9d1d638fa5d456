use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::entity::{categories, inventory, product_variants, products, sellers, users, warehouses};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub nearby_warehouse_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Seller {
    pub seller_id: i32,
    pub company_name: String,
    pub contact_email: String,
    pub gst_number: String,
    pub is_verified: bool,
    pub rating: Decimal,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub category_id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Warehouse {
    pub warehouse_id: i32,
    pub name: String,
    pub street_address: String,
    pub city: String,
    pub zip_code: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub product_id: i32,
    pub seller_id: i32,
    pub category_id: Option<i32>,
    pub title: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductVariant {
    pub variant_id: i32,
    pub product_id: i32,
    pub sku: String,
    #[schema(value_type = Object)]
    pub attributes: Value,
    pub price_adjustment: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InventoryEntry {
    pub variant_id: i32,
    pub warehouse_id: i32,
    pub stock_quantity: i32,
    pub aisle_location: Option<String>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            user_id: model.user_id,
            full_name: model.full_name,
            email: model.email,
            phone_number: model.phone_number,
            nearby_warehouse_id: model.nearby_warehouse_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<sellers::Model> for Seller {
    fn from(model: sellers::Model) -> Self {
        Self {
            seller_id: model.seller_id,
            company_name: model.company_name,
            contact_email: model.contact_email,
            gst_number: model.gst_number,
            is_verified: model.is_verified,
            rating: model.rating,
            balance: model.balance,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            category_id: model.category_id,
            parent_id: model.parent_id,
            name: model.name,
            description: model.description,
        }
    }
}

impl From<warehouses::Model> for Warehouse {
    fn from(model: warehouses::Model) -> Self {
        Self {
            warehouse_id: model.warehouse_id,
            name: model.name,
            street_address: model.street_address,
            city: model.city,
            zip_code: model.zip_code,
            capacity: model.capacity,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            product_id: model.product_id,
            seller_id: model.seller_id,
            category_id: model.category_id,
            title: model.title,
            brand: model.brand,
            description: model.description,
            base_price: model.base_price,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<product_variants::Model> for ProductVariant {
    fn from(model: product_variants::Model) -> Self {
        Self {
            variant_id: model.variant_id,
            product_id: model.product_id,
            sku: model.sku,
            attributes: model.attributes,
            price_adjustment: model.price_adjustment,
        }
    }
}

impl From<inventory::Model> for InventoryEntry {
    fn from(model: inventory::Model) -> Self {
        Self {
            variant_id: model.variant_id,
            warehouse_id: model.warehouse_id,
            stock_quantity: model.stock_quantity,
            aisle_location: model.aisle_location,
        }
    }
}
