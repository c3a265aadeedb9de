//! End-to-end cart behavior against a file-backed store.

use std::fs;

use grt_cache::{Cache, FileStore, SessionId};
use grt_cart::prelude::*;

fn open_store(dir: &std::path::Path) -> CartStore {
    let cache = Cache::new(FileStore::open(dir).unwrap());
    CartStore::open(KvCartPersistence::new(cache))
}

fn three_line_cart(store: &CartStore) {
    store
        .add_or_merge_line(LineItem::new(1, "Bulb", 249.0, 2).with_image("/bulb.png"))
        .unwrap();
    store
        .add_or_merge_line(LineItem::new(2, "Tee", 100.0, 1).with_size("M").with_color("blue"))
        .unwrap();
    store
        .add_or_merge_line(LineItem::new("sku-3", "Lamp", 49.5, 4))
        .unwrap();
}

#[test]
fn cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let first = open_store(dir.path());
    three_line_cart(&first);
    let before = first.snapshot();
    drop(first);

    let second = open_store(dir.path());
    assert_eq!(second.snapshot(), before);
    assert_eq!(second.total_item_count(), 7);
    assert_eq!(second.total_price(), 249.0 * 2.0 + 100.0 + 49.5 * 4.0);
}

#[test]
fn corrupt_payload_reloads_as_empty_cart() {
    let dir = tempfile::tempdir().unwrap();

    let store = open_store(dir.path());
    three_line_cart(&store);
    drop(store);

    let payload = dir.path().join(format!("{}.json", DEFAULT_STORAGE_KEY));
    assert!(payload.exists());
    fs::write(&payload, b"\x00\x01 definitely not json").unwrap();

    let reloaded = open_store(dir.path());
    assert!(reloaded.snapshot().is_empty());
    assert_eq!(reloaded.totals().item_count, 0);
    assert_eq!(reloaded.totals().total_price, 0.0);

    // The next mutation overwrites the bad payload.
    reloaded
        .add_or_merge_line(LineItem::new(1, "Bulb", 249.0, 1))
        .unwrap();
    drop(reloaded);
    assert_eq!(open_store(dir.path()).snapshot().len(), 1);
}

#[test]
fn every_mutation_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path());
    three_line_cart(&store);

    store
        .set_quantity(LineKey::new(2).with_size("M").with_color("blue"), 6)
        .unwrap();
    assert_eq!(open_store(dir.path()).total_item_count(), 12);

    store.remove_line("sku-3");
    assert_eq!(open_store(dir.path()).snapshot().len(), 2);

    store.clear();
    assert!(open_store(dir.path()).snapshot().is_empty());
}

#[test]
fn quantities_never_drop_below_one() {
    let store = CartStore::in_memory();
    three_line_cart(&store);

    store.set_quantity(1, -3).unwrap();
    store.set_quantity("sku-3", 0).unwrap();
    store
        .set_quantity(LineKey::new(2).with_size("M").with_color("blue"), 1)
        .unwrap();
    let _ = store.add_or_merge_line(LineItem::new(9, "Ghost", 10.0, 0));

    let state = store.snapshot();
    assert_eq!(state.len(), 1);
    assert!(state.iter().all(|line| line.quantity >= 1));
}

#[test]
fn sessions_keep_separate_carts() {
    let dir = tempfile::tempdir().unwrap();
    let cache = Cache::new(FileStore::open(dir.path()).unwrap());

    let alice = CartStore::open(KvCartPersistence::for_session(
        cache.clone(),
        &SessionId::new("alice"),
    ));
    let bob = CartStore::open(KvCartPersistence::for_session(
        cache.clone(),
        &SessionId::new("bob"),
    ));

    alice
        .add_or_merge_line(LineItem::new(1, "Bulb", 249.0, 1))
        .unwrap();
    assert!(bob.snapshot().is_empty());
    assert_eq!(
        cache.keys().unwrap(),
        vec!["grtCart:alice".to_string()]
    );
}

#[test]
fn checkout_hands_off_frozen_totals() {
    let store = CartStore::in_memory()
        .with_pricing(PricingRules {
            free_shipping_threshold: 500.0,
            shipping_fee: 40.0,
            tax_rate: 0.1,
        })
        .unwrap();
    store
        .add_or_merge_line(LineItem::new(1, "Bulb", 249.0, 1))
        .unwrap();

    let handoff = store.checkout().unwrap();
    store.clear();

    assert_eq!(handoff.summary.shipping, 40.0);
    assert!((handoff.amount_due() - (249.0 + 40.0 + 24.9)).abs() < 1e-9);
    assert!(matches!(store.checkout(), Err(CartError::EmptyCart)));
}
