mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use marketplace_api::middleware::auth::Role;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, app, database_state, send};

// Seller onboarding through product publication, driven over HTTP:
// register -> blocked login -> admin verify -> login -> create product -> duplicate SKU.
#[tokio::test]
async fn seller_onboarding_and_product_creation() -> anyhow::Result<()> {
    let Some(state) = database_state().await? else {
        return Ok(());
    };
    let app = app(state.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let admin_token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/warehouses",
        Some(&admin_token),
        Some(json!({ "name": "Main", "street_address": "1 Dock Rd", "city": "Pune", "capacity": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let warehouse_id = body["data"]["warehouse_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/categories",
        Some(&admin_token),
        Some(json!({ "name": "Gadgets", "parent_id": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sellers/register",
        None,
        Some(json!({
            "company_name": "Acme",
            "contact_email": "Sales@Acme.test",
            "password": "acme-secret",
            "gst_number": "GST-1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_verified"], false);
    let seller_id = body["data"]["seller_id"].as_i64().unwrap();

    // Same email in another case is still the same email.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/sellers/register",
        None,
        Some(json!({
            "company_name": "Acme Again",
            "contact_email": "sales@acme.test",
            "password": "acme-secret",
            "gst_number": "GST-2"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Even a well-formed token cannot publish while the seller is unverified.
    let early = state.tokens.issue(seller_id.to_string(), Role::Seller)?;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(&early.token),
        Some(json!({
            "title": "Early",
            "base_price": 1,
            "variants": [{ "sku": "E-1", "attributes": {} }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");

    let login = json!({ "email": "sales@acme.test", "password": "acme-secret" });
    let (status, body) = send(&app, Method::POST, "/api/sellers/login", None, Some(login.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");

    let (status, body) =
        send(&app, Method::GET, "/api/admin/sellers/pending", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let verify_uri = format!("/api/admin/sellers/{seller_id}/verify");
    let (status, body) = send(&app, Method::PATCH, &verify_uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_verified"], true);

    // Verifying twice is a no-op success; unknown ids are 404.
    let (status, _) = send(&app, Method::PATCH, &verify_uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) =
        send(&app, Method::PATCH, "/api/admin/sellers/424242/verify", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::POST, "/api/sellers/login", None, Some(login)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "seller");
    assert_eq!(body["data"]["expires_in"], 3600);
    let seller_token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(&seller_token),
        Some(json!({ "title": "Empty", "base_price": 1, "variants": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(&seller_token),
        Some(json!({
            "title": "Orphan",
            "base_price": 1,
            "category_id": 777,
            "variants": [{ "sku": "O-1", "attributes": {} }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let (_, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // The owner comes from the token; a seller_id in the body is ignored.
    let product = json!({
        "seller_id": 424242,
        "title": "Widget",
        "base_price": 9.99,
        "variants": [{
            "sku": "W-1",
            "attributes": { "size": "M" },
            "inventory": [{ "warehouse_id": warehouse_id, "stock_quantity": 10 }]
        }]
    });
    let (status, body) =
        send(&app, Method::POST, "/api/products", Some(&seller_token), Some(product.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["product"]["title"], "Widget");
    assert_eq!(body["data"]["product"]["seller_id"].as_i64(), Some(seller_id));
    assert_eq!(body["data"]["variants"][0]["sku"], "W-1");
    let product_id = body["data"]["product"]["product_id"].as_i64().unwrap();

    let (status, body) =
        send(&app, Method::POST, "/api/products", Some(&seller_token), Some(product)).await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, body) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1, "rolled back product must not be listed");

    let (status, body) =
        send(&app, Method::GET, &format!("/api/products/{product_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["variants"][0]["inventory"][0]["stock_quantity"], 10);

    let (status, _) = send(&app, Method::GET, "/api/products/999999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/warehouses", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Main");

    // Customer registration and login.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users/register",
        None,
        Some(json!({
            "full_name": "Pat Doe",
            "email": "pat@example.com",
            "password": "hunter22",
            "phone_number": "555-0100",
            "nearby_warehouse_id": warehouse_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({ "email": "pat@example.com", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users/login",
        None,
        Some(json!({ "email": "PAT@example.com", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "user");

    Ok(())
}
