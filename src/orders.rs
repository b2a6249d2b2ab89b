//! Orders
//!
//! The persisted order record and its identifiers. Price fields are a
//! snapshot taken at submission; later catalog changes never alter an
//! order already in the store.

use std::fmt;

use jiff::Timestamp;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{checkout::CustomerInfo, pricing::Quote, products::{Product, ProductId}};

/// Characters of the human-facing order code.
const ORDER_NUMBER_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the human-facing order code.
const ORDER_NUMBER_LEN: usize = 8;

/// Internal order identifier, derived from the submission time in
/// milliseconds and unique within a store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Derive an identifier from a submission instant.
    #[must_use]
    pub fn from_timestamp(at: Timestamp) -> Self {
        Self(at.as_millisecond())
    }

    /// The next candidate identifier, used to sidestep collisions when two
    /// orders land in the same millisecond.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Short random base-36 code shown to the customer, distinct from the
/// internal [`OrderId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate a fresh random code.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let code = (0..ORDER_NUMBER_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..ORDER_NUMBER_ALPHABET.len());

                ORDER_NUMBER_ALPHABET
                    .get(idx)
                    .copied()
                    .map_or('0', char::from)
            })
            .collect();

        Self(code)
    }

    /// The code as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Order lifecycle status. New orders start as `pending`; the admin
/// dashboard may move an order to any other status at any time.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting fulfilment.
    #[default]
    Pending,

    /// Handed over to the customer.
    Delivered,

    /// Canceled by the admin.
    Canceled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
        };

        f.write_str(label)
    }
}

/// A persisted order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Internal identifier.
    pub id: OrderId,

    /// Human-facing order code.
    pub number: OrderNumber,

    /// Identifier of the ordered product.
    pub product_id: ProductId,

    /// Product name at submission time.
    pub product_name: String,

    /// Per-unit price actually charged, after discount resolution.
    pub unit_price: Decimal,

    /// Purchased quantity, at least 1.
    pub quantity: u32,

    /// `unit_price * quantity`.
    pub subtotal: Decimal,

    /// Destination wilaya.
    pub wilaya: String,

    /// Flat delivery fee charged for the wilaya.
    pub delivery_fee: Decimal,

    /// `subtotal + delivery_fee`.
    pub total: Decimal,

    /// Customer details submitted with the checkout.
    pub customer: CustomerInfo,

    /// Submission instant.
    pub submitted_at: Timestamp,

    /// Lifecycle status, `pending` on creation.
    pub status: OrderStatus,
}

impl Order {
    /// Assemble an order from a priced quote and validated customer details.
    #[must_use]
    pub fn assemble(
        product: &Product,
        quote: &Quote,
        customer: CustomerInfo,
        id: OrderId,
        number: OrderNumber,
        submitted_at: Timestamp,
    ) -> Self {
        Self {
            id,
            number,
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: quote.unit_price,
            quantity: quote.quantity,
            subtotal: quote.subtotal,
            wilaya: quote.wilaya.clone(),
            delivery_fee: quote.delivery_fee,
            total: quote.total,
            customer,
            submitted_at,
            status: OrderStatus::default(),
        }
    }

    /// Apply an admin patch in place.
    pub fn apply(&mut self, patch: OrderPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Partial update applied by the admin dashboard.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    /// Replacement status, when set.
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    /// A patch that only changes the status.
    #[must_use]
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
        }
    }
}
