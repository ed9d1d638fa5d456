pub mod audit_logs;
pub mod categories;
pub mod inventory;
pub mod product_variants;
pub mod products;
pub mod sellers;
pub mod users;
pub mod warehouses;

pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use inventory::Entity as Inventory;
pub use product_variants::Entity as ProductVariants;
pub use products::Entity as Products;
pub use sellers::Entity as Sellers;
pub use users::Entity as Users;
pub use warehouses::Entity as Warehouses;
