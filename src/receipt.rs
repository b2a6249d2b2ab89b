//! Receipt
//!
//! Presentation-time view of an order. Amounts are rounded to two decimal
//! places and formatted as DZD money here and nowhere else; everything
//! upstream stays exact.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};

use crate::orders::Order;

/// Display view of a stored order.
#[derive(Debug, Clone)]
pub struct Receipt {
    number: String,
    quantity: u32,
    product_name: String,
    subtotal: Decimal,
    delivery_fee: Decimal,
    total: Decimal,
}

impl Receipt {
    /// Build the receipt for an order.
    #[must_use]
    pub fn for_order(order: &Order) -> Self {
        Self {
            number: order.number.to_string(),
            quantity: order.quantity,
            product_name: order.product_name.clone(),
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total: order.total,
        }
    }

    /// Human-facing order code.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Subtotal as display money.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, iso::Currency> {
        to_dzd(self.subtotal)
    }

    /// Delivery fee as display money.
    #[must_use]
    pub fn delivery_fee(&self) -> Money<'static, iso::Currency> {
        to_dzd(self.delivery_fee)
    }

    /// Grand total as display money.
    #[must_use]
    pub fn total(&self) -> Money<'static, iso::Currency> {
        to_dzd(self.total)
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order {}", self.number)?;
        writeln!(f, "{} x {}", self.quantity, self.product_name)?;
        writeln!(f, "Subtotal  {}", self.subtotal())?;
        writeln!(f, "Delivery  {}", self.delivery_fee())?;
        write!(f, "Total     {}", self.total())
    }
}

/// Round to two decimal places and wrap as DZD.
fn to_dzd(amount: Decimal) -> Money<'static, iso::Currency> {
    Money::from_decimal(
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        iso::DZD,
    )
}
