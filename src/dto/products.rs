use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    dto::catalog::required_text,
    error::{AppError, AppResult},
    models::{InventoryEntry, Product, ProductVariant},
};

const MAX_MONEY: i64 = 10_000_000_000;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub base_price: Option<Decimal>,
    pub variants: Option<Vec<VariantRequest>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VariantRequest {
    pub sku: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub attributes: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub price_adjustment: Option<Decimal>,
    pub inventory: Option<Vec<InventoryRequest>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct InventoryRequest {
    pub warehouse_id: Option<i64>,
    pub stock_quantity: Option<i64>,
    pub aisle_location: Option<String>,
}

/// A product creation request that passed shape validation. Only this type reaches
/// the write path.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub category_id: Option<i32>,
    pub title: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub variants: Vec<NewVariant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVariant {
    pub sku: String,
    pub attributes: Value,
    pub price_adjustment: Decimal,
    pub inventory: Vec<NewInventory>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInventory {
    pub warehouse_id: i32,
    pub stock_quantity: i32,
    pub aisle_location: Option<String>,
}

impl NewProduct {
    /// Distinct warehouses referenced by any variant's inventory.
    pub fn warehouse_ids(&self) -> BTreeSet<i32> {
        self.variants
            .iter()
            .flat_map(|v| v.inventory.iter().map(|i| i.warehouse_id))
            .collect()
    }
}

impl CreateProductRequest {
    pub fn validate(self) -> AppResult<NewProduct> {
        let title = required_text(self.title.as_deref())
            .ok_or_else(|| invalid("title is required (string)"))?;

        let base_price = self
            .base_price
            .ok_or_else(|| invalid("base_price is required (number)"))?;
        if base_price < Decimal::ZERO {
            return Err(invalid("base_price must be >= 0"));
        }
        let base_price = money(base_price, "base_price")?;

        let category_id = self
            .category_id
            .map(|id| positive_id(id, "category_id"))
            .transpose()?;

        let variants = match self.variants {
            Some(v) if !v.is_empty() => v,
            _ => return Err(invalid("variants is required (non-empty array)")),
        };

        let variants = variants
            .into_iter()
            .enumerate()
            .map(|(idx, v)| v.validate(idx))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(NewProduct {
            category_id,
            title,
            brand: required_text(self.brand.as_deref()),
            description: required_text(self.description.as_deref()),
            base_price,
            variants,
        })
    }
}

impl VariantRequest {
    fn validate(self, idx: usize) -> AppResult<NewVariant> {
        let sku = required_text(self.sku.as_deref())
            .ok_or_else(|| invalid(format!("variants[{idx}].sku is required (string)")))?;

        let attributes = match self.attributes {
            Some(Value::Object(map)) => Value::Object(map),
            _ => {
                return Err(invalid(format!(
                    "variants[{idx}].attributes is required (object)"
                )));
            }
        };

        let price_adjustment = money(
            self.price_adjustment.unwrap_or_default(),
            &format!("variants[{idx}].price_adjustment"),
        )?;

        let inventory = self
            .inventory
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(inv_idx, inv)| inv.validate(idx, inv_idx))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(NewVariant {
            sku,
            attributes,
            price_adjustment,
            inventory,
        })
    }
}

impl InventoryRequest {
    fn validate(self, idx: usize, inv_idx: usize) -> AppResult<NewInventory> {
        let field = format!("variants[{idx}].inventory[{inv_idx}]");

        let warehouse_id = self
            .warehouse_id
            .ok_or_else(|| invalid(format!("{field}.warehouse_id is required (number)")))?;
        let warehouse_id = positive_id(warehouse_id, &format!("{field}.warehouse_id"))?;

        let stock_quantity = self
            .stock_quantity
            .ok_or_else(|| invalid(format!("{field}.stock_quantity is required (number)")))?;
        let stock_quantity = i32::try_from(stock_quantity)
            .ok()
            .filter(|q| *q >= 0)
            .ok_or_else(|| invalid(format!("{field}.stock_quantity must be >= 0")))?;

        Ok(NewInventory {
            warehouse_id,
            stock_quantity,
            aisle_location: required_text(self.aisle_location.as_deref()),
        })
    }
}

/// Money columns are NUMERIC(12,2): two decimals, magnitude below 10^10.
fn money(value: Decimal, field: &str) -> AppResult<Decimal> {
    let value = value.round_dp(2);
    if value.abs() >= Decimal::from(MAX_MONEY) {
        return Err(invalid(format!("{field} is out of range")));
    }
    Ok(value)
}

fn positive_id(id: i64, field: &str) -> AppResult<i32> {
    i32::try_from(id)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| invalid(format!("{field} must be a positive integer")))
}

fn invalid(reason: impl Into<String>) -> AppError {
    AppError::InvalidInput(reason.into())
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductWithVariants {
    pub product: Product,
    pub variants: Vec<ProductVariant>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VariantDetail {
    #[serde(flatten)]
    pub variant: ProductVariant,
    pub inventory: Vec<InventoryEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    pub variants: Vec<VariantDetail>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
