//! Checkout
//!
//! Validates a checkout submission, prices it and persists the resulting
//! order. Validation failures return before the store is touched, so no
//! partial order is ever written.

use std::fmt;

use jiff::{Timestamp, tz::TimeZone};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::{
    delivery::DeliveryFees,
    discounts::DiscountError,
    orders::{Order, OrderId, OrderNumber},
    pricing,
    products::Product,
    storage::StorageSlot,
    store::{OrderStore, StoreError},
};

/// Customer fields that must be non-empty before submission.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RequiredField {
    /// Customer name.
    Name,

    /// Contact email.
    Email,

    /// Contact phone number.
    Phone,

    /// Destination wilaya.
    Wilaya,

    /// Free-text delivery address.
    Address,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequiredField::Name => "name",
            RequiredField::Email => "email",
            RequiredField::Phone => "phone",
            RequiredField::Wilaya => "wilaya",
            RequiredField::Address => "address",
        };

        f.write_str(label)
    }
}

/// Customer details submitted with a checkout attempt. Not persisted
/// independently of the order that embeds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Customer name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Destination wilaya, also the delivery-fee key.
    pub wilaya: String,

    /// Free-text delivery address.
    pub address: String,

    /// Optional free-text notes.
    pub notes: Option<String>,
}

impl CustomerInfo {
    /// Required fields that are empty or whitespace-only, in display order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let checks = [
            (RequiredField::Name, self.name.as_str()),
            (RequiredField::Email, self.email.as_str()),
            (RequiredField::Phone, self.phone.as_str()),
            (RequiredField::Wilaya, self.wilaya.as_str()),
            (RequiredField::Address, self.address.as_str()),
        ];

        checks
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingFields`] listing every empty field,
    /// so a form can mark them all at once.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let missing = self.missing_fields();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::MissingFields(missing))
        }
    }
}

/// Errors raised while submitting a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One or more required customer fields were empty.
    #[error("missing required customer fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),

    /// The product carries an invalid discount configuration.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The order store rejected or failed the append.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Comma-join field names for the error display.
fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate, price and persist a checkout submission.
///
/// This is the only mutation point for order creation. Customer fields are
/// validated first and pricing resolves discounts as of `now` (UTC), so a
/// rejected submission never touches the store. The order's identifier is
/// derived from `now` in milliseconds and probed against the stored list
/// until free, keeping identifiers unique within the store.
///
/// # Errors
///
/// - [`CheckoutError::MissingFields`] when any required customer field is
///   empty; nothing is persisted.
/// - [`CheckoutError::Discount`] when the product's discount configuration
///   is invalid; nothing is persisted.
/// - [`CheckoutError::Store`] when the store cannot be read or rewritten.
pub fn place_order<S: StorageSlot, R: Rng>(
    store: &OrderStore<S>,
    product: &Product,
    quantity: u32,
    customer: CustomerInfo,
    fees: &DeliveryFees,
    now: Timestamp,
    rng: &mut R,
) -> Result<Order, CheckoutError> {
    customer.validate()?;

    let today = now.to_zoned(TimeZone::UTC).date();
    let quote = pricing::quote_product(product, quantity, &customer.wilaya, fees, today)?;

    let existing = store.list()?;
    let mut id = OrderId::from_timestamp(now);

    while existing.iter().any(|order| order.id == id) {
        id = id.next();
    }

    let order = Order::assemble(
        product,
        &quote,
        customer,
        id,
        OrderNumber::generate(rng),
        now,
    );

    store.append(order.clone())?;

    info!(
        order = %order.id,
        number = %order.number,
        total = %order.total,
        wilaya = %order.wilaya,
        "order placed"
    );

    Ok(order)
}
