use marketplace_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    run_migrations(&pool).await?;

    seed_warehouses(&pool).await?;
    seed_categories(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_warehouses(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let warehouses = vec![
        ("Central Fulfilment", "12 Dock Road", "Pune", Some("411001"), 50_000),
        ("North Hub", "7 Ring Road", "Delhi", Some("110001"), 20_000),
    ];

    for (name, street, city, zip, capacity) in warehouses {
        sqlx::query(
            r#"
            INSERT INTO warehouses (name, street_address, city, zip_code, capacity)
            SELECT $1, $2, $3, $4, $5
            WHERE NOT EXISTS (SELECT 1 FROM warehouses WHERE name = $1)
            "#,
        )
        .bind(name)
        .bind(street)
        .bind(city)
        .bind(zip)
        .bind(capacity)
        .execute(pool)
        .await?;
    }

    println!("Seeded warehouses");
    Ok(())
}

async fn seed_categories(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let roots = vec![
        ("Apparel", "Clothing and accessories"),
        ("Electronics", "Devices and gadgets"),
    ];
    for (name, description) in roots {
        ensure_category(pool, None, name, description).await?;
    }

    let apparel = category_id(pool, "Apparel").await?;
    ensure_category(pool, Some(apparel), "T-Shirts", "Short sleeve tops").await?;
    let electronics = category_id(pool, "Electronics").await?;
    ensure_category(pool, Some(electronics), "Headphones", "Wired and wireless audio").await?;

    println!("Seeded categories");
    Ok(())
}

async fn ensure_category(
    pool: &sqlx::PgPool,
    parent_id: Option<i32>,
    name: &str,
    description: &str,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO categories (parent_id, name, description)
        SELECT $1, $2, $3
        WHERE NOT EXISTS (SELECT 1 FROM categories WHERE name = $2)
        "#,
    )
    .bind(parent_id)
    .bind(name)
    .bind(description)
    .execute(pool)
    .await?;
    Ok(())
}

async fn category_id(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<i32> {
    let (id,): (i32,) = sqlx::query_as("SELECT category_id FROM categories WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(id)
}
