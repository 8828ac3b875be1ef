//! Invariants that must hold after any sequence of cart operations.

use std::collections::HashSet;

use cart_cache::MemoryStore;
use cart_commerce::prelude::*;
use cart_observability::StructuredLogger;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add { product: u8, price: i64 },
    Update { index: usize, delta: i64 },
    Remove { index: usize },
    UpdateById { product: u8, delta: i64 },
    Checkout,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..6, 0i64..2_000_000).prop_map(|(product, price)| Op::Add { product, price }),
        4 => (0usize..8, -3i64..4).prop_map(|(index, delta)| Op::Update { index, delta }),
        2 => (0usize..8).prop_map(|index| Op::Remove { index }),
        2 => (0u8..6, -2i64..3).prop_map(|(product, delta)| Op::UpdateById { product, delta }),
        1 => Just(Op::Checkout),
    ]
}

fn product_id(product: u8) -> ProductId {
    ProductId::new(format!("p{}", product))
}

fn apply(store: &mut CartStore<KvCartStorage<MemoryStore>>, op: &Op) {
    let len = store.len();
    match op {
        Op::Add { product, price } => {
            let id = product_id(*product);
            // A product keeps the price it was first added with.
            let price = store
                .get_by_id(&id)
                .map(|item| item.unit_price)
                .unwrap_or(Money::new(*price));
            store
                .add_item(id, format!("Product {}", product), price, "img.jpg")
                .unwrap_or_else(|e| panic!("add failed: {e}"));
        }
        Op::Update { index, delta } => {
            let result = store.update_quantity(*index, *delta);
            if *index < len {
                result.unwrap_or_else(|e| panic!("update failed: {e}"));
            } else {
                assert!(matches!(result, Err(CartError::OutOfRange { .. })));
            }
        }
        Op::Remove { index } => {
            let result = store.remove_item(*index);
            if *index < len {
                result.unwrap_or_else(|e| panic!("remove failed: {e}"));
            } else {
                assert!(matches!(result, Err(CartError::OutOfRange { .. })));
            }
        }
        Op::UpdateById { product, delta } => {
            let id = product_id(*product);
            let present = store.get_by_id(&id).is_some();
            let result = store.update_quantity_by_id(&id, *delta);
            assert_eq!(result.is_ok(), present);
        }
        Op::Checkout => store
            .checkout()
            .unwrap_or_else(|e| panic!("checkout failed: {e}")),
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn totals_match_recomputation(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let memory = MemoryStore::new();
        let storage = KvCartStorage::new(memory.clone(), StructuredLogger::disabled());
        let mut store = CartStore::open(storage, StructuredLogger::disabled());

        for op in &ops {
            apply(&mut store, op);

            let total: i64 = store
                .items()
                .iter()
                .map(|item| item.unit_price.amount() * item.quantity)
                .sum();
            let count: i64 = store.items().iter().map(|item| item.quantity).sum();
            prop_assert_eq!(store.total(), Money::new(total));
            prop_assert_eq!(store.count(), count);

            let ids: HashSet<&str> = store.items().iter().map(|item| item.id.as_str()).collect();
            prop_assert_eq!(ids.len(), store.len());
            prop_assert!(store.items().iter().all(|item| item.quantity > 0));
        }

        // Whatever was persisted last reloads to the same cart.
        let reloaded = KvCartStorage::new(memory, StructuredLogger::disabled()).load();
        prop_assert_eq!(&reloaded, store.cart());
    }
}
