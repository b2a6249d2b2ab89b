//! Pricing
//!
//! Pure checkout arithmetic: `subtotal = unit price x quantity` and
//! `total = subtotal + delivery fee`. All amounts stay exact `Decimal`s;
//! rounding to two decimal places happens only at presentation time
//! (see [`crate::receipt`]), never here.

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::{
    delivery::DeliveryFees,
    discounts::{self, DiscountError},
    products::Product,
};

/// A priced checkout line.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Per-unit price used for the subtotal, after discount resolution.
    pub unit_price: Decimal,

    /// Purchased quantity, at least 1.
    pub quantity: u32,

    /// `unit_price * quantity`, exact.
    pub subtotal: Decimal,

    /// Destination wilaya the fee was looked up for.
    pub wilaya: String,

    /// Flat delivery fee for the wilaya, or the table's fallback.
    pub delivery_fee: Decimal,

    /// `subtotal + delivery_fee`, exact.
    pub total: Decimal,
}

/// Price a quantity at a unit price for delivery to a wilaya.
///
/// A quantity below 1 is clamped to 1. The delivery fee comes from the
/// table, falling back to its documented default for unlisted wilayas.
#[must_use]
pub fn quote(unit_price: Decimal, quantity: u32, wilaya: &str, fees: &DeliveryFees) -> Quote {
    let quantity = quantity.max(1);
    let subtotal = unit_price * Decimal::from(quantity);
    let delivery_fee = fees.fee_for(wilaya);

    Quote {
        unit_price,
        quantity,
        subtotal,
        wilaya: wilaya.to_owned(),
        delivery_fee,
        total: subtotal + delivery_fee,
    }
}

/// Price a product, resolving its discounts as of `today`.
///
/// # Errors
///
/// Returns a [`DiscountError`] when the product carries an invalid discount
/// configuration.
pub fn quote_product(
    product: &Product,
    quantity: u32,
    wilaya: &str,
    fees: &DeliveryFees,
    today: Date,
) -> Result<Quote, DiscountError> {
    let quantity = quantity.max(1);
    let unit_price = discounts::effective_unit_price(product, quantity, today)?;

    Ok(quote(unit_price, quantity, wilaya, fees))
}
