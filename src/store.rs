//! Order store
//!
//! Order records persisted as one JSON-encoded array in a single storage
//! slot. Every mutation reads the full list, applies the change in memory
//! and rewrites the full list; last write wins and a single writer is
//! assumed. There are no partial or transactional updates.

use thiserror::Error;
use tracing::debug;

use crate::{
    orders::{Order, OrderId, OrderPatch},
    storage::{StorageError, StorageSlot},
};

/// Errors raised by the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No stored order has the given identifier.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// An order with the given identifier is already stored.
    #[error("order {0} already exists")]
    Duplicate(OrderId),

    /// The stored payload is not a valid order list.
    #[error("stored order list is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The order list could not be encoded for persistence.
    #[error("failed to encode order list: {0}")]
    Encode(#[source] serde_json::Error),

    /// The storage slot itself failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Persisted order records behind an injected [`StorageSlot`].
#[derive(Debug)]
pub struct OrderStore<S: StorageSlot> {
    slot: S,
}

impl<S: StorageSlot> OrderStore<S> {
    /// Create a store over the given slot.
    #[must_use]
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// All stored orders, in append order.
    ///
    /// An unwritten slot reads as an empty list.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Storage`] when the slot cannot be read.
    /// - [`StoreError::Corrupt`] when the payload does not decode as an
    ///   order list.
    pub fn list(&self) -> Result<Vec<Order>, StoreError> {
        match self.slot.read()? {
            None => Ok(Vec::new()),
            Some(payload) => serde_json::from_str(&payload).map_err(StoreError::Corrupt),
        }
    }

    /// Append a new order.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Duplicate`] when an order with the same identifier is
    ///   already stored; the list is left untouched.
    /// - Any error from [`OrderStore::list`] or the rewrite.
    pub fn append(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.list()?;

        if orders.iter().any(|stored| stored.id == order.id) {
            return Err(StoreError::Duplicate(order.id));
        }

        debug!(order = %order.id, number = %order.number, "appending order");

        orders.push(order);
        self.persist(&orders)
    }

    /// Apply a patch to a stored order and return the updated record.
    ///
    /// Status transitions are unconstrained; any status may move to any
    /// other. All other fields are left unchanged.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] when no stored order has the identifier.
    /// - Any error from [`OrderStore::list`] or the rewrite.
    pub fn update(&self, id: OrderId, patch: OrderPatch) -> Result<Order, StoreError> {
        let mut orders = self.list()?;

        let Some(order) = orders.iter_mut().find(|stored| stored.id == id) else {
            return Err(StoreError::NotFound(id));
        };

        order.apply(patch);
        let updated = order.clone();

        self.persist(&orders)?;

        debug!(order = %id, status = %updated.status, "order updated");

        Ok(updated)
    }

    /// Delete a stored order. Irreversible from the store's perspective.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] when no stored order has the identifier.
    /// - Any error from [`OrderStore::list`] or the rewrite.
    pub fn remove(&self, id: OrderId) -> Result<(), StoreError> {
        let mut orders = self.list()?;
        let before = orders.len();

        orders.retain(|stored| stored.id != id);

        if orders.len() == before {
            return Err(StoreError::NotFound(id));
        }

        self.persist(&orders)?;

        debug!(order = %id, "order removed");

        Ok(())
    }

    /// Rewrite the whole list into the slot.
    fn persist(&self, orders: &[Order]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(orders).map_err(StoreError::Encode)?;

        Ok(self.slot.write(&payload)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        checkout::CustomerInfo,
        orders::{OrderNumber, OrderStatus},
        products::ProductId,
        storage::{MemorySlot, MockStorageSlot},
    };

    use super::*;

    fn sample_order(id_millis: i64) -> TestResult<Order> {
        let submitted_at = Timestamp::from_millisecond(id_millis)?;

        Ok(Order {
            id: OrderId::from_timestamp(submitted_at),
            number: OrderNumber::generate(&mut rand::thread_rng()),
            product_id: ProductId::new(1),
            product_name: "Portland cement 50kg".to_owned(),
            unit_price: Decimal::from(1500u32),
            quantity: 2,
            subtotal: Decimal::from(3000u32),
            wilaya: "الجزائر".to_owned(),
            delivery_fee: Decimal::from(500u32),
            total: Decimal::from(3500u32),
            customer: CustomerInfo {
                name: "Amine".to_owned(),
                email: "amine@example.com".to_owned(),
                phone: "0550000000".to_owned(),
                wilaya: "الجزائر".to_owned(),
                address: "Rue Didouche Mourad 12".to_owned(),
                notes: None,
            },
            submitted_at,
            status: OrderStatus::default(),
        })
    }

    #[test]
    fn empty_slot_lists_nothing() -> TestResult {
        let store = OrderStore::new(MemorySlot::new());

        assert!(store.list()?.is_empty());

        Ok(())
    }

    #[test]
    fn append_then_list_round_trips() -> TestResult {
        let store = OrderStore::new(MemorySlot::new());
        let order = sample_order(1_000)?;

        store.append(order.clone())?;

        assert_eq!(store.list()?, vec![order]);

        Ok(())
    }

    #[test]
    fn append_rejects_duplicate_id() -> TestResult {
        let store = OrderStore::new(MemorySlot::new());

        store.append(sample_order(1_000)?)?;
        let result = store.append(sample_order(1_000)?);

        assert!(
            matches!(result, Err(StoreError::Duplicate(_))),
            "expected Duplicate, got {result:?}"
        );
        assert_eq!(store.list()?.len(), 1, "duplicate must not be stored");

        Ok(())
    }

    #[test]
    fn update_changes_status_and_nothing_else() -> TestResult {
        let store = OrderStore::new(MemorySlot::new());
        let first = sample_order(1_000)?;
        let second = sample_order(2_000)?;

        store.append(first.clone())?;
        store.append(second.clone())?;

        let updated = store.update(first.id, OrderPatch::status(OrderStatus::Delivered))?;

        assert_eq!(updated.status, OrderStatus::Delivered);
        assert_eq!(updated.total, first.total);
        assert_eq!(updated.customer, first.customer);

        let stored = store.list()?;
        let untouched = stored.iter().find(|order| order.id == second.id);

        assert_eq!(untouched, Some(&second), "other orders are unaffected");

        Ok(())
    }

    #[test]
    fn update_missing_id_is_not_found() -> TestResult {
        let store = OrderStore::new(MemorySlot::new());

        store.append(sample_order(1_000)?)?;

        let missing = OrderId::from_timestamp(Timestamp::from_millisecond(9_999)?);
        let result = store.update(missing, OrderPatch::status(OrderStatus::Canceled));

        assert!(
            matches!(result, Err(StoreError::NotFound(_))),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn remove_drops_exactly_one_order() -> TestResult {
        let store = OrderStore::new(MemorySlot::new());
        let first = sample_order(1_000)?;
        let second = sample_order(2_000)?;

        store.append(first.clone())?;
        store.append(second)?;

        store.remove(first.id)?;

        let stored = store.list()?;

        assert_eq!(stored.len(), 1);
        assert!(
            stored.iter().all(|order| order.id != first.id),
            "removed id must be absent"
        );

        Ok(())
    }

    #[test]
    fn remove_missing_id_is_not_found() {
        let store = OrderStore::new(MemorySlot::new());

        let missing = OrderId::from_timestamp(Timestamp::UNIX_EPOCH);
        let result = store.remove(missing);

        assert!(
            matches!(result, Err(StoreError::NotFound(_))),
            "expected NotFound, got {result:?}"
        );
    }

    #[test]
    fn corrupt_payload_surfaces_as_corrupt() {
        let mut slot = MockStorageSlot::new();
        slot.expect_read()
            .returning(|| Ok(Some("not json".to_owned())));

        let store = OrderStore::new(slot);
        let result = store.list();

        assert!(
            matches!(result, Err(StoreError::Corrupt(_))),
            "expected Corrupt, got {result:?}"
        );
    }

    #[test]
    fn storage_failure_propagates() {
        let mut slot = MockStorageSlot::new();
        slot.expect_read()
            .returning(|| Err(StorageError::Io(io::Error::other("disk gone"))));

        let store = OrderStore::new(slot);
        let result = store.list();

        assert!(
            matches!(result, Err(StoreError::Storage(_))),
            "expected Storage, got {result:?}"
        );
    }
}
