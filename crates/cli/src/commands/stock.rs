//! Stock movement commands.
//!
//! # Usage
//!
//! ```bash
//! # Receive 20 units
//! twill stock in --variant-id 44 --quantity 20 --reason "Restock" --supplier "Hanoi Textiles"
//!
//! # Ship 2 units (creates a sales order on the backend)
//! twill stock out --variant-id 44 --quantity 2 --reason "Phone order" \
//!     --customer-name "Lan Pham" --customer-phone 0912345678
//!
//! # Correct the on-hand count
//! twill stock adjust --variant-id 44 --new-stock 18 --reason "Cycle count"
//! ```

use twill_admin::api::types::{
    CustomerDetails, StockAdjustRequest, StockInRequest, StockOutRequest,
};
use twill_core::VariantId;

use super::{CliError, Operator};

fn check_quantity(quantity: i32) -> Result<(), CliError> {
    if quantity < 1 {
        return Err(CliError::InvalidInput(
            "quantity must be at least 1".to_owned(),
        ));
    }
    Ok(())
}

/// Receive stock into the warehouse.
///
/// # Errors
///
/// Returns an error if the inputs are invalid or the backend rejects the
/// movement.
pub async fn stock_in(
    variant_id: i32,
    quantity: i32,
    reason: &str,
    supplier: Option<String>,
) -> Result<(), CliError> {
    check_quantity(quantity)?;

    let operator = Operator::connect().await?;
    let ack = operator
        .authorized()
        .stock_in(&StockInRequest {
            variant_id: VariantId::new(variant_id),
            quantity,
            reason: reason.to_owned(),
            supplier,
        })
        .await?;

    tracing::info!(
        "Stock received: variant {} +{} ({})",
        variant_id,
        quantity,
        ack.message.unwrap_or_else(|| "ok".to_owned())
    );
    Ok(())
}

/// Ship stock out; the backend creates a sales order for the customer.
///
/// # Errors
///
/// Returns an error if the inputs are invalid or the backend rejects the
/// movement.
pub async fn stock_out(
    variant_id: i32,
    quantity: i32,
    reason: &str,
    customer_name: &str,
    customer_phone: &str,
    customer_email: Option<String>,
) -> Result<(), CliError> {
    check_quantity(quantity)?;

    if !(10..=11).contains(&customer_phone.len())
        || !customer_phone.chars().all(|c| c.is_ascii_digit())
    {
        return Err(CliError::InvalidInput(
            "customer phone must be 10-11 digits".to_owned(),
        ));
    }

    let operator = Operator::connect().await?;
    let ack = operator
        .authorized()
        .stock_out(&StockOutRequest {
            variant_id: VariantId::new(variant_id),
            quantity,
            reason: reason.to_owned(),
            customer: CustomerDetails {
                customer_name: customer_name.to_owned(),
                customer_phone: customer_phone.to_owned(),
                customer_email,
            },
        })
        .await?;

    match ack.data.order {
        Some(order) => tracing::info!(
            "Stock shipped: variant {} -{}; sales order {} created",
            variant_id,
            quantity,
            order.order_number.unwrap_or_else(|| order.id.to_string())
        ),
        None => tracing::info!(
            "Stock shipped: variant {} -{} ({})",
            variant_id,
            quantity,
            ack.message.unwrap_or_else(|| "ok".to_owned())
        ),
    }
    Ok(())
}

/// Set a variant's on-hand count to an absolute value.
///
/// # Errors
///
/// Returns an error if the inputs are invalid or the backend rejects the
/// movement.
pub async fn adjust(variant_id: i32, new_stock: i32, reason: &str) -> Result<(), CliError> {
    if new_stock < 0 {
        return Err(CliError::InvalidInput(
            "new stock cannot be negative".to_owned(),
        ));
    }

    let operator = Operator::connect().await?;
    let ack = operator
        .authorized()
        .adjust_stock(&StockAdjustRequest {
            variant_id: VariantId::new(variant_id),
            new_stock,
            reason: reason.to_owned(),
        })
        .await?;

    tracing::info!(
        "Stock adjusted: variant {} set to {} ({})",
        variant_id,
        new_stock,
        ack.message.unwrap_or_else(|| "ok".to_owned())
    );
    Ok(())
}
