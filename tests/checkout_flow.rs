//! End-to-end checkout and order-management scenarios.
//!
//! Walks the whole flow the storefront exercises: a product is priced for a
//! destination wilaya, the checkout submission is validated and persisted,
//! and the admin side lists, updates and deletes the stored records.
//!
//! Reference arithmetic used throughout:
//!
//! - Cement at 1500 DZD, quantity 2, delivered to الجزائر (fee 500):
//!   subtotal 3000, total 3500.
//! - A wilaya missing from the fee table is charged the fallback fee
//!   (1000 DZD): unit 1000, quantity 1 gives total 2000.

use jiff::Timestamp;
use rand::{SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use testresult::TestResult;

use souk::prelude::*;

fn cement() -> Product {
    Product {
        id: ProductId::new(1),
        name: "Portland cement 50kg".to_owned(),
        unit_price: Decimal::from(1500u32),
        original_price: None,
        description: "CEM II/B 42.5, 50kg sack".to_owned(),
        image: "cement.jpg".to_owned(),
        unit: Some("sack".to_owned()),
        bulk: None,
        discount: None,
    }
}

fn sand() -> Product {
    Product {
        id: ProductId::new(2),
        name: "Washed sand 25kg".to_owned(),
        unit_price: Decimal::from(1000u32),
        original_price: None,
        description: String::new(),
        image: "sand.jpg".to_owned(),
        unit: Some("sack".to_owned()),
        bulk: None,
        discount: None,
    }
}

fn customer(wilaya: &str) -> CustomerInfo {
    CustomerInfo {
        name: "Amine".to_owned(),
        email: "amine@example.com".to_owned(),
        phone: "0550000000".to_owned(),
        wilaya: wilaya.to_owned(),
        address: "Rue Didouche Mourad 12".to_owned(),
        notes: Some("call before delivery".to_owned()),
    }
}

fn now() -> TestResult<Timestamp> {
    Ok("2026-08-30T12:00:00Z".parse()?)
}

#[test]
fn checkout_to_algiers_prices_and_persists() -> TestResult {
    let store = OrderStore::new(MemorySlot::new());
    let fees = DeliveryFees::algeria();
    let mut rng = StdRng::seed_from_u64(11);

    let order = place_order(
        &store,
        &cement(),
        2,
        customer("الجزائر"),
        &fees,
        now()?,
        &mut rng,
    )?;

    assert_eq!(order.subtotal, Decimal::from(3000u32));
    assert_eq!(order.delivery_fee, Decimal::from(500u32));
    assert_eq!(order.total, Decimal::from(3500u32));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(store.list()?, vec![order]);

    Ok(())
}

#[test]
fn unlisted_wilaya_is_charged_the_fallback_fee() -> TestResult {
    let store = OrderStore::new(MemorySlot::new());
    let fees = DeliveryFees::algeria();
    let mut rng = StdRng::seed_from_u64(11);

    let order = place_order(
        &store,
        &sand(),
        1,
        customer("تندوف"),
        &fees,
        now()?,
        &mut rng,
    )?;

    assert_eq!(order.delivery_fee, Decimal::from(FALLBACK_FEE_DZD));
    assert_eq!(
        order.total,
        Decimal::from(1000u32) + Decimal::from(FALLBACK_FEE_DZD)
    );

    Ok(())
}

#[test]
fn invalid_submission_leaves_the_store_untouched() -> TestResult {
    let store = OrderStore::new(MemorySlot::new());
    let fees = DeliveryFees::algeria();
    let mut rng = StdRng::seed_from_u64(11);

    let mut incomplete = customer("الجزائر");
    incomplete.wilaya = String::new();
    incomplete.phone = " ".to_owned();

    let result = place_order(&store, &cement(), 1, incomplete, &fees, now()?, &mut rng);

    assert!(
        matches!(result, Err(CheckoutError::MissingFields(ref missing))
            if missing.as_slice() == [RequiredField::Phone, RequiredField::Wilaya]),
        "expected MissingFields(phone, wilaya), got {result:?}"
    );
    assert!(store.list()?.is_empty());

    Ok(())
}

#[test]
fn admin_status_update_touches_exactly_one_order() -> TestResult {
    let store = OrderStore::new(MemorySlot::new());
    let fees = DeliveryFees::algeria();
    let mut rng = StdRng::seed_from_u64(11);

    let first = place_order(&store, &cement(), 2, customer("الجزائر"), &fees, now()?, &mut rng)?;
    let second = place_order(&store, &sand(), 1, customer("وهران"), &fees, now()?, &mut rng)?;

    let updated = store.update(first.id, OrderPatch::status(OrderStatus::Delivered))?;

    assert_eq!(updated.status, OrderStatus::Delivered);
    assert_eq!(updated.number, first.number, "identity fields unchanged");
    assert_eq!(updated.total, first.total, "price snapshot unchanged");

    let stored = store.list()?;
    let other = stored.iter().find(|order| order.id == second.id);

    assert_eq!(other, Some(&second), "second order unaffected");

    Ok(())
}

#[test]
fn admin_delete_removes_exactly_one_order() -> TestResult {
    let store = OrderStore::new(MemorySlot::new());
    let fees = DeliveryFees::algeria();
    let mut rng = StdRng::seed_from_u64(11);

    let first = place_order(&store, &cement(), 2, customer("الجزائر"), &fees, now()?, &mut rng)?;
    let second = place_order(&store, &sand(), 1, customer("وهران"), &fees, now()?, &mut rng)?;

    store.remove(first.id)?;

    let stored = store.list()?;

    assert_eq!(stored.len(), 1);
    assert!(stored.iter().all(|order| order.id != first.id));
    assert!(stored.iter().any(|order| order.id == second.id));

    Ok(())
}

#[test]
fn orders_survive_a_restart_through_a_file_slot() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.json");
    let fees = DeliveryFees::algeria();
    let mut rng = StdRng::seed_from_u64(11);

    let placed = {
        let store = OrderStore::new(FileSlot::new(&path));

        place_order(&store, &cement(), 2, customer("الجزائر"), &fees, now()?, &mut rng)?
    };

    let reopened = OrderStore::new(FileSlot::new(&path));

    assert_eq!(reopened.list()?, vec![placed]);

    Ok(())
}

#[test]
fn catalog_price_change_does_not_rewrite_history() -> TestResult {
    let store = OrderStore::new(MemorySlot::new());
    let fees = DeliveryFees::algeria();
    let mut rng = StdRng::seed_from_u64(11);

    let mut product = cement();
    let order = place_order(&store, &product, 2, customer("الجزائر"), &fees, now()?, &mut rng)?;

    // Admin reprices the product after the order was placed.
    product.unit_price = Decimal::from(1800u32);

    let stored = store.list()?;
    let snapshot = stored.first();

    assert_eq!(
        snapshot.map(|stored| stored.unit_price),
        Some(Decimal::from(1500u32)),
        "order keeps the price it was sold at"
    );
    assert_eq!(snapshot, Some(&order));

    Ok(())
}

#[test]
fn receipt_rounds_only_for_display() -> TestResult {
    let store = OrderStore::new(MemorySlot::new());
    let fees = DeliveryFees::algeria();
    let mut rng = StdRng::seed_from_u64(11);

    let mut product = sand();
    product.unit_price = Decimal::new(10_333, 3); // 10.333 DZD per sack

    let order = place_order(&store, &product, 3, customer("الجزائر"), &fees, now()?, &mut rng)?;

    assert_eq!(order.subtotal, Decimal::new(30_999, 3), "stored exact");

    let receipt = Receipt::for_order(&order);
    let rendered = receipt.to_string();

    assert!(rendered.contains(order.number.as_str()), "{rendered}");

    Ok(())
}
