//! Wire types for the retail backend's privileged endpoints.
//!
//! The backend speaks camelCase JSON; every payload is wrapped in an
//! [`Envelope`]. These are transient copies of server-owned data.

pub mod common;
pub mod inventory;
pub mod product;
pub mod report;
pub mod user;

pub use common::{Envelope, Pagination};
pub use inventory::{
    BulkLine, BulkStockInRequest, CategoryBreakdown, CustomerDetails, InventoryOverview,
    InventorySummary, InventoryTransaction, InventoryVariant, LowStockAlert, MovementReceipt,
    OrderRef, StockAdjustRequest, StockInRequest, StockOutRequest, TransactionFilter,
    VariantStockFilter,
};
pub use product::{
    CategoryPayload, CategoryRef, NewProduct, Product, ProductCategory, ProductFilter,
    ProductStatusUpdate, ProductSummary, ProductUpdate, ProductVariant, VariantPayload,
    VariantStockUpdate,
};
pub use report::{
    DashboardStats, ExportFile, InventoryReport, ProfitReport, ReportKind, ReportRange,
    SalesReport,
};
pub use user::{
    LoginRequest, LoginResponse, NewUser, PasswordChange, ProfileUpdate, User, UserFilter,
    UserStats, UserSummary, UserUpdate,
};
