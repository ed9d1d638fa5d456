use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::SellerList,
        auth::{LoginRequest, LoginResponse, RegisterSellerRequest, RegisterUserRequest},
        catalog::{CategoryList, CreateCategoryRequest, CreateWarehouseRequest, WarehouseList},
        products::{
            CreateProductRequest, InventoryRequest, ProductDetail, ProductList,
            ProductWithVariants, VariantDetail, VariantRequest,
        },
    },
    error::ErrorBody,
    middleware::auth::Role,
    models::{Category, InventoryEntry, Product, ProductVariant, Seller, User, Warehouse},
    response::{ApiResponse, Meta},
    routes::{admin, categories, health, products, sellers, users, warehouses},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::db_health_check,
        users::register,
        users::login,
        sellers::register,
        sellers::login,
        admin::admin_login,
        admin::list_pending_sellers,
        admin::verify_seller,
        categories::list_categories,
        categories::create_category,
        warehouses::list_warehouses,
        warehouses::create_warehouse,
        products::list_products,
        products::get_product,
        products::create_product
    ),
    components(
        schemas(
            User,
            Seller,
            Category,
            Warehouse,
            Product,
            ProductVariant,
            InventoryEntry,
            Role,
            ErrorBody,
            Meta,
            RegisterUserRequest,
            RegisterSellerRequest,
            LoginRequest,
            LoginResponse,
            CreateCategoryRequest,
            CreateWarehouseRequest,
            CreateProductRequest,
            VariantRequest,
            InventoryRequest,
            SellerList,
            CategoryList,
            WarehouseList,
            ProductList,
            ProductWithVariants,
            ProductDetail,
            VariantDetail,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<ProductDetail>,
            ApiResponse<ProductWithVariants>,
            ApiResponse<LoginResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "Customer registration and login"),
        (name = "Sellers", description = "Seller registration and login"),
        (name = "Admin", description = "Admin login and seller verification"),
        (name = "Catalog", description = "Categories and warehouses"),
        (name = "Products", description = "Product catalog"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
