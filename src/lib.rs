//! Souk
//!
//! Souk is the pricing, checkout and order management core of a storefront for a
//! building-materials retailer: exact order pricing (per-wilaya delivery fees,
//! dated discount windows, bulk-quantity discounts) and a persisted order
//! record store behind an injected storage seam.

pub mod catalog;
pub mod checkout;
pub mod delivery;
pub mod discounts;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod storage;
pub mod store;
