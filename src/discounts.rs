//! Discounts
//!
//! Resolves the per-unit price a customer actually pays: a dated direct
//! discount price supersedes the unit price while its window is active, and
//! otherwise a bulk percentage applies once the purchased quantity meets the
//! product's threshold. The two mechanisms are mutually exclusive per product,
//! with the direct price taking precedence when both are configured.

use decimal_percentage::Percentage;
use jiff::civil::Date;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::products::{BulkDiscount, DiscountWindow, Product};

/// Errors specific to discount resolution.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// The discount window starts after it ends.
    #[error("discount window starts {starts} after it ends {ends}")]
    WindowOrder {
        /// Configured first day.
        starts: Date,

        /// Configured last day.
        ends: Date,
    },

    /// The discount price is negative.
    #[error("discount price {0} is negative")]
    NegativePrice(Decimal),

    /// The bulk discount fraction is outside `0..=1`.
    #[error("bulk discount fraction {0} is outside the range 0 to 1")]
    PercentRange(Decimal),

    /// The bulk discount threshold is zero, so it could never apply.
    #[error("bulk discount threshold must be at least 1")]
    ZeroThreshold,
}

/// Resolve the per-unit price for a product as of `today`.
///
/// If a direct discount window is configured and `today` falls within it
/// (bounds inclusive), the window price supersedes the unit price regardless
/// of quantity. Otherwise the bulk percentage reduces the unit price when
/// `quantity` meets the threshold. With neither active the plain unit price
/// is returned, exact and unrounded.
///
/// # Errors
///
/// Returns a [`DiscountError`] when a configured discount is invalid:
/// - [`DiscountError::WindowOrder`] or [`DiscountError::NegativePrice`] for a
///   malformed window.
/// - [`DiscountError::PercentRange`] or [`DiscountError::ZeroThreshold`] for a
///   malformed bulk discount.
pub fn effective_unit_price(
    product: &Product,
    quantity: u32,
    today: Date,
) -> Result<Decimal, DiscountError> {
    if let Some(window) = &product.discount {
        validate_window(window)?;

        if window.contains(today) {
            return Ok(window.price);
        }
    }

    if let Some(bulk) = &product.bulk {
        validate_bulk(bulk)?;

        if quantity >= bulk.threshold {
            let off = bulk.percent * product.unit_price;

            return Ok(product.unit_price - off);
        }
    }

    Ok(product.unit_price)
}

/// Reject windows that can never be active or would price below zero.
fn validate_window(window: &DiscountWindow) -> Result<(), DiscountError> {
    if window.starts > window.ends {
        return Err(DiscountError::WindowOrder {
            starts: window.starts,
            ends: window.ends,
        });
    }

    if window.price < Decimal::ZERO {
        return Err(DiscountError::NegativePrice(window.price));
    }

    Ok(())
}

/// Reject bulk discounts with an impossible threshold or fraction.
fn validate_bulk(bulk: &BulkDiscount) -> Result<(), DiscountError> {
    let fraction_value = fraction(bulk.percent);

    if fraction_value < Decimal::ZERO || fraction_value > Decimal::ONE {
        return Err(DiscountError::PercentRange(fraction_value));
    }

    if bulk.threshold == 0 {
        return Err(DiscountError::ZeroThreshold);
    }

    Ok(())
}

/// Extract the fraction as a `Decimal`.
fn fraction(percent: Percentage) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal directly
    percent * Decimal::ONE
}
