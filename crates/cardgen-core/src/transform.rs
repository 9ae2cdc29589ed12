//! Batch CVC injection over existing orders.
//!
//! Orders that already carry a CVC are never touched, so running the
//! transform again over its own output changes nothing.

use serde::Serialize;
use tracing::debug;

use crate::cvc::CvcDeriver;
use crate::error::{CardgenError, Result};
use crate::luhn;
use crate::pan::mask_pan;
use crate::types::Order;

/// Counts from one transform run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformSummary {
    /// Orders in the batch
    pub total: usize,
    /// Orders that received a CVC
    pub updated: usize,
    /// Orders that already had one
    pub skipped: usize,
}

/// Check that an order's PAN and expiry can enter CVC derivation.
fn check_order(order: &Order) -> Result<()> {
    let invalid = |reason: String| CardgenError::InvalidOrder {
        order_id: order.id.clone(),
        reason,
    };

    if !luhn::validate(&order.pan) {
        return Err(invalid(format!(
            "PAN {} failed Luhn validation",
            mask_pan(&order.pan)
        )));
    }
    if !(1..=12).contains(&order.expiry_month) {
        return Err(invalid(format!(
            "expiry month {} out of range",
            order.expiry_month
        )));
    }
    if !(1000..=9999).contains(&order.expiry_year) {
        return Err(invalid(format!(
            "expiry year {} is not four digits",
            order.expiry_year
        )));
    }
    Ok(())
}

/// Derive and inject a CVC into every order that lacks one.
///
/// Orders are processed in input order and only their `cvc` field is
/// written. Every order needing a CVC is checked before any is written,
/// so on error the slice is left exactly as it was.
///
/// # Errors
///
/// - [`CardgenError::MissingSecret`] if `secret` is empty, before any order
///   is inspected
/// - [`CardgenError::InvalidOrder`] naming the first order whose PAN is not
///   Luhn-valid or whose expiry is malformed
pub fn transform_orders(orders: &mut [Order], secret: &str) -> Result<TransformSummary> {
    let deriver = CvcDeriver::new(secret)?;

    for order in orders.iter().filter(|o| o.needs_cvc()) {
        check_order(order)?;
    }

    let mut summary = TransformSummary {
        total: orders.len(),
        ..TransformSummary::default()
    };

    for order in orders.iter_mut() {
        if !order.needs_cvc() {
            summary.skipped += 1;
            continue;
        }
        order.cvc = deriver.derive_for_expiry(&order.pan, order.expiry_month, order.expiry_year);
        summary.updated += 1;
    }

    debug!(
        total = summary.total,
        updated = summary.updated,
        skipped = summary.skipped,
        "injected CVCs into orders"
    );

    Ok(summary)
}
