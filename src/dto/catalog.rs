use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Category, Warehouse},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub parent_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWarehouseRequest {
    pub name: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub capacity: Option<i64>,
}

/// Warehouse fields after trimming and range checks.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWarehouse {
    pub name: String,
    pub street_address: String,
    pub city: String,
    pub zip_code: Option<String>,
    pub capacity: Option<i32>,
}

impl CreateCategoryRequest {
    pub fn name(&self) -> AppResult<String> {
        required_text(self.name.as_deref())
            .ok_or_else(|| AppError::InvalidInput("name is required (string)".into()))
    }
}

impl CreateWarehouseRequest {
    pub fn validate(self) -> AppResult<NewWarehouse> {
        let (Some(name), Some(street_address), Some(city)) = (
            required_text(self.name.as_deref()),
            required_text(self.street_address.as_deref()),
            required_text(self.city.as_deref()),
        ) else {
            return Err(AppError::InvalidInput(
                "name, street_address, and city are required".into(),
            ));
        };

        let capacity = match self.capacity {
            None => None,
            Some(c) => Some(
                i32::try_from(c)
                    .ok()
                    .filter(|c| *c >= 0)
                    .ok_or_else(|| AppError::InvalidInput("capacity must be a number >= 0".into()))?,
            ),
        };

        Ok(NewWarehouse {
            name,
            street_address,
            city,
            zip_code: required_text(self.zip_code.as_deref()),
            capacity,
        })
    }
}

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn required_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct WarehouseList {
    #[schema(value_type = Vec<Warehouse>)]
    pub items: Vec<Warehouse>,
}
