//! Souk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError},
    checkout::{CheckoutError, CustomerInfo, RequiredField, place_order},
    delivery::{DeliveryFees, FALLBACK_FEE_DZD, FeeTableError},
    discounts::{DiscountError, effective_unit_price},
    orders::{Order, OrderId, OrderNumber, OrderPatch, OrderStatus},
    pricing::{Quote, quote, quote_product},
    products::{BulkDiscount, DiscountWindow, Product, ProductId},
    receipt::Receipt,
    storage::{FileSlot, MemorySlot, StorageError, StorageSlot},
    store::{OrderStore, StoreError},
};
