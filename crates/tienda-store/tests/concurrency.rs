//! Concurrent access on a multi-threaded runtime.

use std::sync::Arc;

use tienda_store::prelude::*;

async fn setup(shoppers: usize, stock: i64) -> (Arc<MemoryStore>, Vec<u64>) {
    let store = Arc::new(MemoryStore::with_config(StoreConfig::low_cost()));
    store
        .create_product(NewProduct {
            name: "Widget".to_string(),
            price_cents: 1000,
            stock,
        })
        .await
        .unwrap();

    let mut user_ids = Vec::with_capacity(shoppers);
    for i in 0..shoppers {
        let user = store
            .create_user(NewUser {
                name: format!("Shopper {i}"),
                email: format!("shopper{i}@example.com"),
                credential: "correct horse".to_string(),
            })
            .await
            .unwrap();
        user_ids.push(user.id);
    }
    (store, user_ids)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn last_unit_sold_exactly_once() {
    for _ in 0..20 {
        let (store, users) = setup(2, 1).await;
        for &user_id in &users {
            store.add_to_cart(user_id, 1, 1).await.unwrap();
        }

        let handles: Vec<_> = users
            .iter()
            .map(|&user_id| {
                let store = store.clone();
                tokio::spawn(async move { store.checkout(user_id).await })
            })
            .collect();

        let mut successes = 0;
        let mut shortfalls = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(StoreError::InsufficientStock {
                    available: 0,
                    requested: 1,
                    ..
                }) => shortfalls += 1,
                Err(other) => panic!("unexpected checkout error: {other}"),
            }
        }

        assert_eq!((successes, shortfalls), (1, 1));
        assert_eq!(store.stock_level(1).await.unwrap(), 0);
        assert_eq!(store.sales_summary().await.total_orders, 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn oversubscribed_checkouts_never_oversell() {
    let (store, users) = setup(16, 10).await;
    for &user_id in &users {
        store.add_to_cart(user_id, 1, 1).await.unwrap();
    }

    let handles: Vec<_> = users
        .iter()
        .map(|&user_id| {
            let store = store.clone();
            tokio::spawn(async move { store.checkout(user_id).await.is_ok() })
        })
        .collect();

    let mut sold = 0;
    for handle in handles {
        if handle.await.unwrap() {
            sold += 1;
        }
    }

    assert_eq!(sold, 10);
    assert_eq!(store.stock_level(1).await.unwrap(), 0);

    let summary = store.sales_summary().await;
    assert_eq!(summary.total_orders, 10);
    assert_eq!(summary.top_products[0].units_sold, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_adds_to_one_cart_accumulate() {
    let (store, users) = setup(1, 0).await;
    let user_id = users[0];

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.add_to_cart(user_id, 1, 2).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let cart = store.get_cart(user_id).await.unwrap();
    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.quantity_of(1), Some(100));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_keep_emails_unique() {
    let store = Arc::new(MemoryStore::with_config(StoreConfig::low_cost()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .create_user(NewUser {
                        name: format!("Twin {i}"),
                        email: "twin@example.com".to_string(),
                        credential: "correct horse".to_string(),
                    })
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(StoreError::Conflict(_)) => {}
            Err(other) => panic!("unexpected registration error: {other}"),
        }
    }
    assert_eq!(created, 1);
}
