//! Role and status enums shared by the storefront and back-office services.

use serde::{Deserialize, Serialize};

/// Back-office role with different permission levels.
///
/// Admins may manage users; both roles may operate the catalog and inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Full access, including user management.
    Admin,
    /// Catalog and inventory operations only.
    Manager,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Inventory transaction kind.
///
/// The wire form is SCREAMING_SNAKE (`IN`/`OUT`/`ADJUST`); lowercase and
/// legacy `adjustment` spellings from older backend revisions are accepted
/// on reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Stock received into the warehouse.
    #[serde(alias = "in")]
    In,
    /// Stock shipped out; the backend creates a sales order alongside.
    #[serde(alias = "out")]
    Out,
    /// Absolute correction of the on-hand count.
    #[serde(alias = "adjust", alias = "adjustment", alias = "ADJUSTMENT")]
    Adjust,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::In => write!(f, "IN"),
            Self::Out => write!(f, "OUT"),
            Self::Adjust => write!(f, "ADJUST"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "adjust" | "adjustment" => Ok(Self::Adjust),
            _ => Err(format!("invalid transaction type: {s}")),
        }
    }
}

/// Derived stock status for a product variant.
///
/// Never stored; computed from the variant's current stock against its
/// low-stock threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Classify a stock level against its minimum threshold.
    #[must_use]
    pub const fn for_levels(stock: i32, min_stock: i32) -> Self {
        if stock == 0 {
            Self::OutOfStock
        } else if stock <= min_stock {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Whether this status should raise a replenishment alert.
    #[must_use]
    pub const fn needs_attention(&self) -> bool {
        matches!(self, Self::LowStock | Self::OutOfStock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_form() {
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).expect("serialize"),
            "\"ADMIN\""
        );
        let role: UserRole = serde_json::from_str("\"MANAGER\"").expect("deserialize");
        assert_eq!(role, UserRole::Manager);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("Manager".parse::<UserRole>(), Ok(UserRole::Manager));
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_transaction_type_wire_form() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Adjust).expect("serialize"),
            "\"ADJUST\""
        );
        let t: TransactionType = serde_json::from_str("\"OUT\"").expect("deserialize");
        assert_eq!(t, TransactionType::Out);
    }

    #[test]
    fn test_transaction_type_legacy_aliases() {
        // Older backend revisions report lowercase forms on reads.
        let t: TransactionType = serde_json::from_str("\"in\"").expect("deserialize");
        assert_eq!(t, TransactionType::In);
        let t: TransactionType = serde_json::from_str("\"adjustment\"").expect("deserialize");
        assert_eq!(t, TransactionType::Adjust);
    }

    #[test]
    fn test_stock_status_classification() {
        assert_eq!(StockStatus::for_levels(0, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::for_levels(3, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::for_levels(5, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::for_levels(6, 5), StockStatus::InStock);
    }

    #[test]
    fn test_needs_attention() {
        assert!(StockStatus::OutOfStock.needs_attention());
        assert!(StockStatus::LowStock.needs_attention());
        assert!(!StockStatus::InStock.needs_attention());
    }
}
