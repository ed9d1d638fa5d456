mod common;

use marketplace_api::{
    dto::products::{NewInventory, NewProduct, NewVariant},
    entity::{
        Inventory, ProductVariants, Products, categories, inventory, products, sellers, warehouses,
    },
    error::AppError,
    services::{auth_service::hash_password, product_service::create_catalog_entry},
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use serde_json::json;

use common::database_state;

async fn seller(orm: &DatabaseConnection, email: &str) -> anyhow::Result<i32> {
    let row = sellers::ActiveModel {
        seller_id: NotSet,
        company_name: Set("Acme".into()),
        contact_email: Set(email.into()),
        password_hash: Set(hash_password("acme-secret")?),
        gst_number: Set("GST-1".into()),
        is_verified: Set(true),
        rating: NotSet,
        balance: NotSet,
        created_at: NotSet,
    }
    .insert(orm)
    .await?;
    Ok(row.seller_id)
}

async fn warehouse(orm: &DatabaseConnection, name: &str) -> anyhow::Result<i32> {
    let row = warehouses::ActiveModel {
        warehouse_id: NotSet,
        name: Set(name.into()),
        street_address: Set("1 Dock Rd".into()),
        city: Set("Pune".into()),
        zip_code: Set(None),
        capacity: Set(Some(100)),
        is_active: Set(true),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;
    Ok(row.warehouse_id)
}

fn stock(warehouse_id: i32, stock_quantity: i32, aisle: Option<&str>) -> NewInventory {
    NewInventory {
        warehouse_id,
        stock_quantity,
        aisle_location: aisle.map(str::to_string),
    }
}

fn variant(sku: &str, inventory: Vec<NewInventory>) -> NewVariant {
    NewVariant {
        sku: sku.into(),
        attributes: json!({ "size": "M" }),
        price_adjustment: Decimal::ZERO,
        inventory,
    }
}

fn product(title: &str, category_id: Option<i32>, variants: Vec<NewVariant>) -> NewProduct {
    NewProduct {
        category_id,
        title: title.into(),
        brand: None,
        description: None,
        base_price: Decimal::new(999, 2),
        variants,
    }
}

async fn product_count(orm: &DatabaseConnection) -> anyhow::Result<u64> {
    Ok(Products::find().count(orm).await?)
}

// All transactional properties share one database, so they run in sequence here.
#[tokio::test]
async fn catalog_entry_is_all_or_nothing() -> anyhow::Result<()> {
    let Some(state) = database_state().await? else {
        return Ok(());
    };
    let orm = &state.orm;

    let seller_id = seller(orm, "sales@acme.test").await?;
    let main = warehouse(orm, "Main").await?;
    let spare = warehouse(orm, "Spare").await?;
    let category = categories::ActiveModel {
        category_id: NotSet,
        parent_id: Set(None),
        name: Set("Gadgets".into()),
        description: Set(None),
    }
    .insert(orm)
    .await?;

    // Repeated (variant, warehouse) pairs collapse to the last values given.
    let created = create_catalog_entry(
        orm,
        seller_id,
        product(
            "Widget",
            Some(category.category_id),
            vec![
                variant(
                    "W-1",
                    vec![stock(main, 10, Some("A1")), stock(main, 4, Some("B2"))],
                ),
                variant("W-2", vec![stock(spare, 0, None)]),
                variant("W-3", vec![]),
            ],
        ),
    )
    .await?;
    assert_eq!(created.product.seller_id, seller_id);
    assert_eq!(created.product.category_id, Some(category.category_id));
    assert_eq!(created.variants.len(), 3);

    let w1 = created.variants[0].variant_id;
    let rows = Inventory::find()
        .filter(inventory::Column::VariantId.eq(w1))
        .all(orm)
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].stock_quantity, 4);
    assert_eq!(rows[0].aisle_location.as_deref(), Some("B2"));
    assert_eq!(Inventory::find().count(orm).await?, 2);

    // Duplicate SKU in a later variant: nothing from the attempt survives.
    let err = create_catalog_entry(
        orm,
        seller_id,
        product(
            "Gadget",
            None,
            vec![variant("G-1", vec![stock(main, 1, None)]), variant("W-2", vec![])],
        ),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(ref msg) if msg.contains("W-2")), "{err:?}");
    assert_eq!(product_count(orm).await?, 1);
    assert_eq!(ProductVariants::find().count(orm).await?, 3);
    assert_eq!(Inventory::find().count(orm).await?, 2);

    // Duplicate SKU within a single request.
    let err = create_catalog_entry(
        orm,
        seller_id,
        product("Twins", None, vec![variant("T-1", vec![]), variant("T-1", vec![])]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "{err:?}");
    assert_eq!(product_count(orm).await?, 1);

    // Every unknown warehouse is named, and nothing is written.
    let err = create_catalog_entry(
        orm,
        seller_id,
        product(
            "Ghost",
            None,
            vec![variant(
                "GH-1",
                vec![stock(main, 1, None), stock(9001, 1, None), stock(9000, 1, None)],
            )],
        ),
    )
    .await
    .unwrap_err();
    match err {
        AppError::InvalidReference(msg) => assert_eq!(msg, "Unknown warehouse_id(s): 9000, 9001"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(product_count(orm).await?, 1);

    let lost = product("Lost", Some(424242), vec![variant("L-1", vec![])]);
    let err = create_catalog_entry(orm, seller_id, lost).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidReference(_)), "{err:?}");
    assert_eq!(product_count(orm).await?, 1);

    // A second seller's product is owned by that seller.
    let other = seller(orm, "hello@other.test").await?;
    let created = create_catalog_entry(
        orm,
        other,
        product("Other", None, vec![variant("O-1", vec![])]),
    )
    .await?;
    assert_eq!(created.product.seller_id, other);
    assert_eq!(
        Products::find()
            .filter(products::Column::SellerId.eq(seller_id))
            .count(orm)
            .await?,
        1
    );

    Ok(())
}
