use std::collections::{BTreeSet, HashMap};

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionError, TransactionTrait,
};
use sea_orm::sea_query::OnConflict;

use crate::{
    audit::{self, Actor},
    dto::products::{
        CreateProductRequest, NewInventory, NewProduct, NewVariant, ProductDetail, ProductList,
        ProductWithVariants, VariantDetail,
    },
    entity::{
        Categories, Inventory, ProductVariants, Products, Warehouses,
        inventory::{ActiveModel as InventoryActive, Column as InventoryCol},
        product_variants::{ActiveModel as VariantActive, Column as VariantCol},
        products::{ActiveModel as ProductActive, Column as ProductCol},
        warehouses::Column as WarehouseCol,
    },
    error::{AppError, AppResult},
    middleware::auth::VerifiedSeller,
    models::{InventoryEntry, Product, ProductVariant},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Public listing returns at most this many products, newest first.
pub const LISTING_LIMIT: u64 = 50;

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = Products::find()
        .order_by_desc(ProductCol::ProductId)
        .limit(LISTING_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::listing(items.len(), Some(LISTING_LIMIT));
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductDetail>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    let variants = ProductVariants::find()
        .filter(VariantCol::ProductId.eq(product.product_id))
        .order_by_asc(VariantCol::VariantId)
        .all(&state.orm)
        .await?;

    let variant_ids: Vec<i32> = variants.iter().map(|v| v.variant_id).collect();
    let mut stock: HashMap<i32, Vec<InventoryEntry>> = HashMap::new();
    if !variant_ids.is_empty() {
        for row in Inventory::find()
            .filter(InventoryCol::VariantId.is_in(variant_ids))
            .order_by_asc(InventoryCol::WarehouseId)
            .all(&state.orm)
            .await?
        {
            stock
                .entry(row.variant_id)
                .or_default()
                .push(InventoryEntry::from(row));
        }
    }

    let variants = variants
        .into_iter()
        .map(|v| VariantDetail {
            inventory: stock.remove(&v.variant_id).unwrap_or_default(),
            variant: ProductVariant::from(v),
        })
        .collect();

    Ok(ApiResponse::success(
        "Product",
        ProductDetail {
            product: Product::from(product),
            variants,
        },
        None,
    ))
}

/// Validate, then write. The owning seller always comes from the token, never from the body.
pub async fn create_product(
    state: &AppState,
    seller: &VerifiedSeller,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<ProductWithVariants>> {
    let seller_id = seller.seller_id;
    let input = payload.validate()?;

    let created = create_catalog_entry(&state.orm, seller_id, input).await?;

    tracing::info!(
        seller_id,
        product_id = created.product.product_id,
        variants = created.variants.len(),
        "product created"
    );
    audit::record(
        &state.pool,
        Actor::from(&seller.user),
        "product_create",
        "products",
        serde_json::json!({
            "product_id": created.product.product_id,
            "skus": created.variants.iter().map(|v| v.sku.as_str()).collect::<Vec<_>>(),
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        created,
        Some(Meta::empty()),
    ))
}

/// Writes the product, its variants and their inventory in one transaction. Any error
/// inside the closure rolls the whole unit back before it is reported.
pub async fn create_catalog_entry(
    orm: &DatabaseConnection,
    seller_id: i32,
    input: NewProduct,
) -> AppResult<ProductWithVariants> {
    orm.transaction::<_, ProductWithVariants, AppError>(move |txn| {
        Box::pin(async move { write_product(txn, seller_id, input).await })
    })
    .await
    .map_err(|err| match err {
        TransactionError::Connection(e) => AppError::from(e),
        TransactionError::Transaction(e) => e,
    })
}

async fn write_product(
    txn: &DatabaseTransaction,
    seller_id: i32,
    input: NewProduct,
) -> AppResult<ProductWithVariants> {
    check_references(txn, &input).await?;

    let NewProduct {
        category_id,
        title,
        brand,
        description,
        base_price,
        variants,
    } = input;

    let product = ProductActive {
        product_id: NotSet,
        seller_id: Set(seller_id),
        category_id: Set(category_id),
        title: Set(title),
        brand: Set(brand),
        description: Set(description),
        base_price: Set(base_price),
        created_at: NotSet,
    }
    .insert(txn)
    .await
    .map_err(|e| AppError::from_write(e, "Duplicate value"))?;

    let mut created = Vec::with_capacity(variants.len());
    for variant in variants {
        created.push(write_variant(txn, product.product_id, variant).await?);
    }

    Ok(ProductWithVariants {
        product: Product::from(product),
        variants: created,
    })
}

async fn check_references(txn: &DatabaseTransaction, input: &NewProduct) -> AppResult<()> {
    if let Some(category_id) = input.category_id {
        if Categories::find_by_id(category_id).one(txn).await?.is_none() {
            return Err(AppError::InvalidReference(format!(
                "Invalid category_id {category_id} (category not found)"
            )));
        }
    }

    let wanted = input.warehouse_ids();
    if wanted.is_empty() {
        return Ok(());
    }

    let found: BTreeSet<i32> = Warehouses::find()
        .select_only()
        .column(WarehouseCol::WarehouseId)
        .filter(WarehouseCol::WarehouseId.is_in(wanted.iter().copied()))
        .into_tuple::<i32>()
        .all(txn)
        .await?
        .into_iter()
        .collect();

    let missing: Vec<String> = wanted
        .difference(&found)
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::InvalidReference(format!(
            "Unknown warehouse_id(s): {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

async fn write_variant(
    txn: &DatabaseTransaction,
    product_id: i32,
    variant: NewVariant,
) -> AppResult<ProductVariant> {
    let NewVariant {
        sku,
        attributes,
        price_adjustment,
        inventory,
    } = variant;

    let conflict = format!("Duplicate SKU '{sku}'");
    let row = VariantActive {
        variant_id: NotSet,
        product_id: Set(product_id),
        sku: Set(sku),
        attributes: Set(attributes),
        price_adjustment: Set(price_adjustment),
    }
    .insert(txn)
    .await
    .map_err(|e| AppError::from_write(e, &conflict))?;

    for entry in inventory {
        upsert_inventory(txn, row.variant_id, entry).await?;
    }

    Ok(ProductVariant::from(row))
}

/// Insert-or-replace keyed by `(variant_id, warehouse_id)`.
async fn upsert_inventory(
    txn: &DatabaseTransaction,
    variant_id: i32,
    entry: NewInventory,
) -> AppResult<()> {
    let row = InventoryActive {
        variant_id: Set(variant_id),
        warehouse_id: Set(entry.warehouse_id),
        stock_quantity: Set(entry.stock_quantity),
        aisle_location: Set(entry.aisle_location),
    };

    Inventory::insert(row)
        .on_conflict(
            OnConflict::columns([InventoryCol::VariantId, InventoryCol::WarehouseId])
                .update_columns([InventoryCol::StockQuantity, InventoryCol::AisleLocation])
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await
        .map_err(|e| AppError::from_write(e, "Duplicate inventory entry"))?;

    Ok(())
}
