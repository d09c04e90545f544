//! Report payloads and the Excel export descriptor.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::inventory::InventoryTransaction;
use super::product::ProductSummary;

/// Date-range parameters accepted by the report endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Daily sales rollup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub total_orders: u64,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
}

/// A best-selling product line within a sales report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product: ProductSummary,
    pub quantity: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Warehouse valuation snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub total_products: u64,
    pub total_variants: u64,
    pub total_stock: u64,
    pub low_stock_items: u64,
    pub out_of_stock_items: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_inventory_value: Decimal,
}

/// Margin rollup over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitReport {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: u64,
    pub total_categories: u64,
    pub low_stock_alerts: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(default)]
    pub recent_transactions: Vec<InventoryTransaction>,
}

/// The Excel exports offered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Inventory,
    Transactions,
    Orders,
}

impl ReportKind {
    /// Path segment used by the export endpoints
    /// (`/reports/{kind}-export`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Transactions => "transactions",
            Self::Orders => "orders",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inventory" => Ok(Self::Inventory),
            "transactions" => Ok(Self::Transactions),
            "orders" => Ok(Self::Orders),
            _ => Err(format!("invalid report kind: {s}")),
        }
    }
}

/// A downloaded Excel export: the bytes plus the metadata needed to relay
/// them to the browser.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_parse() {
        assert_eq!("inventory".parse::<ReportKind>(), Ok(ReportKind::Inventory));
        assert_eq!("Orders".parse::<ReportKind>(), Ok(ReportKind::Orders));
        assert!("sales".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_report_range_query_form() {
        let range = ReportRange {
            start_date: NaiveDate::from_ymd_opt(2026, 7, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 7, 31),
        };
        let query = serde_urlencoded::to_string(range).expect("encode");
        assert_eq!(query, "startDate=2026-07-01&endDate=2026-07-31");
    }

    #[test]
    fn test_inventory_report_deserializes() {
        let report: InventoryReport = serde_json::from_str(
            r#"{
                "totalProducts": 24,
                "totalVariants": 96,
                "totalStock": 1240,
                "lowStockItems": 7,
                "outOfStockItems": 2,
                "totalInventoryValue": 186000000
            }"#,
        )
        .expect("deserialize");
        assert_eq!(report.low_stock_items, 7);
    }
}
