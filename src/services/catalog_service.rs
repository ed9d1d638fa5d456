use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    audit::{self, Actor},
    dto::catalog::{
        CategoryList, CreateCategoryRequest, CreateWarehouseRequest, WarehouseList,
        required_text,
    },
    entity::{
        categories::{ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories},
        warehouses::{ActiveModel as WarehouseActive, Column as WarehouseCol, Entity as Warehouses},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, Warehouse},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items: Vec<Category> = Categories::find()
        .order_by_asc(CategoryCol::CategoryId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

    let meta = Meta::listing(items.len(), None);
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let name = payload.name()?;

    if let Some(parent_id) = payload.parent_id {
        if Categories::find_by_id(parent_id)
            .one(&state.orm)
            .await?
            .is_none()
        {
            return Err(AppError::InvalidReference(
                "Invalid parent_id (category not found)".into(),
            ));
        }
    }

    let category = CategoryActive {
        category_id: NotSet,
        parent_id: Set(payload.parent_id),
        name: Set(name),
        description: Set(required_text(payload.description.as_deref())),
    }
    .insert(&state.orm)
    .await
    .map_err(|e| AppError::from_write(e, "Category already exists"))?;

    audit::record(
        &state.pool,
        Actor::from(user),
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.category_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category created",
        Category::from(category),
        Some(Meta::empty()),
    ))
}

/// Public listing: inactive warehouses are hidden.
pub async fn list_warehouses(state: &AppState) -> AppResult<ApiResponse<WarehouseList>> {
    let items: Vec<Warehouse> = Warehouses::find()
        .filter(WarehouseCol::IsActive.eq(true))
        .order_by_asc(WarehouseCol::WarehouseId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Warehouse::from)
        .collect();

    let meta = Meta::listing(items.len(), None);
    Ok(ApiResponse::success("Warehouses", WarehouseList { items }, Some(meta)))
}

pub async fn create_warehouse(
    state: &AppState,
    user: &AuthUser,
    payload: CreateWarehouseRequest,
) -> AppResult<ApiResponse<Warehouse>> {
    ensure_admin(user)?;
    let input = payload.validate()?;

    let warehouse = WarehouseActive {
        warehouse_id: NotSet,
        name: Set(input.name),
        street_address: Set(input.street_address),
        city: Set(input.city),
        zip_code: Set(input.zip_code),
        capacity: Set(input.capacity),
        is_active: Set(true),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Actor::from(user),
        "warehouse_create",
        "warehouses",
        serde_json::json!({ "warehouse_id": warehouse.warehouse_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Warehouse created",
        Warehouse::from(warehouse),
        Some(Meta::empty()),
    ))
}
