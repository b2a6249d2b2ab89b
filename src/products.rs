//! Products

use std::fmt;

use decimal_percentage::Percentage;
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier, assigned by the catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a product identifier from its raw value.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A dated window during which a direct discount price replaces the unit price.
///
/// Both bounds are inclusive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DiscountWindow {
    /// Per-unit price charged while the window is active.
    pub price: Decimal,

    /// First day of the window.
    pub starts: Date,

    /// Last day of the window.
    pub ends: Date,
}

impl DiscountWindow {
    /// Whether the given day falls within the window, bounds included.
    #[must_use]
    pub fn contains(&self, day: Date) -> bool {
        self.starts <= day && day <= self.ends
    }
}

/// A percentage off the unit price once the purchased quantity meets a threshold.
#[derive(Debug, Copy, Clone)]
pub struct BulkDiscount {
    /// Fraction taken off the unit price (`0.05` is 5% off).
    pub percent: Percentage,

    /// Minimum quantity at which the discount applies.
    pub threshold: u32,
}

/// A catalog product, immutable from the checkout's perspective.
#[derive(Debug, Clone)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Per-unit price in DZD.
    pub unit_price: Decimal,

    /// Pre-discount price shown struck through, when set.
    pub original_price: Option<Decimal>,

    /// Free-text description.
    pub description: String,

    /// Image reference.
    pub image: String,

    /// Measurement unit the product is sold by (e.g. sack, metre).
    pub unit: Option<String>,

    /// Quantity-threshold discount, when configured.
    pub bulk: Option<BulkDiscount>,

    /// Dated direct-price discount, when configured.
    pub discount: Option<DiscountWindow>,
}
