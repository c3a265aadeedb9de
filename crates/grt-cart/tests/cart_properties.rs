//! Cart invariants over generated line items and operation sequences.

use std::collections::HashSet;

use grt_cache::{Cache, MemoryStore};
use grt_cart::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(LineItem),
    Remove(LineKey),
    RemoveProduct(ProductId),
    Set(LineKey, i64),
    Clear,
}

// A small id and variant space so merges and removals actually hit.
fn product_id() -> impl Strategy<Value = ProductId> {
    prop_oneof![
        (1i64..4).prop_map(ProductId::Number),
        Just(ProductId::from("sku-a")),
        Just(ProductId::from("1")),
    ]
}

fn line_key() -> impl Strategy<Value = LineKey> {
    (
        product_id(),
        prop::option::of(prop_oneof![Just("S"), Just("M")]),
        prop::option::of(Just("red")),
    )
        .prop_map(|(id, size, color)| LineKey {
            id,
            size: size.map(String::from),
            color: color.map(String::from),
        })
}

fn line_item(quantity: impl Strategy<Value = i64>) -> impl Strategy<Value = LineItem> {
    (line_key(), 0u32..100_000, quantity).prop_map(|(key, cents, quantity)| LineItem {
        id: key.id,
        name: "Item".to_string(),
        price: f64::from(cents) / 100.0,
        image: None,
        quantity,
        size: key.size,
        color: key.color,
    })
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => line_item(-2i64..20).prop_map(Op::Add),
        1 => line_key().prop_map(Op::Remove),
        1 => product_id().prop_map(Op::RemoveProduct),
        2 => (line_key(), -2i64..20).prop_map(|(key, quantity)| Op::Set(key, quantity)),
        1 => Just(Op::Clear),
    ]
}

/// Reference behavior on a plain vector.
fn apply_to_model(model: &mut Vec<LineItem>, op: &Op) {
    match op {
        Op::Add(item) if item.quantity <= 0 => {}
        Op::Add(item) => match model.iter_mut().find(|l| l.key() == item.key()) {
            Some(line) => line.quantity += item.quantity,
            None => model.push(item.clone()),
        },
        Op::Remove(key) => model.retain(|l| &l.key() != key),
        Op::RemoveProduct(id) => model.retain(|l| &l.id != id),
        Op::Set(key, quantity) if *quantity <= 0 => model.retain(|l| &l.key() != key),
        Op::Set(key, quantity) => {
            if let Some(line) = model.iter_mut().find(|l| &l.key() == key) {
                line.quantity = *quantity;
            }
        }
        Op::Clear => model.clear(),
    }
}

fn apply_to_store(store: &CartStore, op: &Op) -> Option<Applied> {
    match op {
        Op::Add(item) => store.add_or_merge_line(item.clone()).ok(),
        Op::Remove(key) => Some(store.remove_line(key.clone())),
        Op::RemoveProduct(id) => Some(store.remove_product(id.clone())),
        Op::Set(key, quantity) => store.set_quantity(key.clone(), *quantity).ok(),
        Op::Clear => Some(store.clear()),
    }
}

fn check_invariants(state: &CartState) -> Result<(), TestCaseError> {
    let keys: HashSet<LineKey> = state.iter().map(LineItem::key).collect();
    prop_assert_eq!(keys.len(), state.len(), "duplicate line key in {:?}", state);
    prop_assert!(state.iter().all(|line| line.quantity >= 1));

    let count: i64 = state.iter().map(|line| line.quantity).sum();
    let price: f64 = state
        .iter()
        .map(|line| line.price * line.quantity as f64)
        .sum();
    prop_assert_eq!(total_item_count(state), count);
    prop_assert_eq!(total_price(state), price);
    prop_assert_eq!(CartTotals::of(state).line_count, state.len());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn operation_sequences_keep_invariants(ops in prop::collection::vec(op(), 0..40)) {
        let cache = Cache::new(MemoryStore::new());
        let store = CartStore::open(KvCartPersistence::new(cache.clone()));
        let mut model = Vec::new();

        for op in &ops {
            let applied = apply_to_store(&store, op);
            apply_to_model(&mut model, op);

            // Only adds with quantity < 1 are rejected in this space.
            prop_assert_eq!(applied.is_none(), matches!(op, Op::Add(item) if item.quantity <= 0));
            if let Some(applied) = &applied {
                prop_assert!(applied.is_durable());
                prop_assert_eq!(&applied.state, &store.snapshot());
            }

            let state = store.snapshot();
            prop_assert_eq!(state.lines(), model.as_slice());
            check_invariants(&state)?;

            let persistence = KvCartPersistence::new(cache.clone());
            let loaded = persistence.load();
            prop_assert_eq!(&loaded, &state);
            persistence.save(&loaded).unwrap();
            prop_assert_eq!(persistence.load(), loaded);
        }
    }

    #[test]
    fn adds_merge_by_key(items in prop::collection::vec(line_item(1i64..20), 0..30)) {
        let store = CartStore::in_memory();

        for item in items {
            let before = store.snapshot();
            let key = item.key();
            let added = item.quantity;
            let state = store.add_or_merge_line(item).unwrap().state;

            match before.get(&key) {
                Some(existing) => {
                    prop_assert_eq!(state.len(), before.len());
                    let merged = state.get(&key).unwrap();
                    prop_assert_eq!(merged.quantity, existing.quantity + added);
                    prop_assert_eq!(merged.price, existing.price);
                }
                None => {
                    prop_assert_eq!(state.len(), before.len() + 1);
                    prop_assert_eq!(state.lines().last().map(LineItem::key), Some(key));
                }
            }
            check_invariants(&state)?;
        }
    }

    #[test]
    fn valid_states_survive_json(items in prop::collection::vec(line_item(1i64..1000), 0..12)) {
        let mut seen = HashSet::new();
        let lines: Vec<LineItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.key()))
            .collect();
        let state = CartState::from_lines(lines).unwrap();
        check_invariants(&state)?;

        let json = serde_json::to_string(&state).unwrap();
        let decoded: CartState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, state);
    }
}
