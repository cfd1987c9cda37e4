#![cfg(feature = "redis")]

// These run against a live server and are skipped unless REDIS_URL is set.

use apotek_repo::redis::{connect, RedisCartRepo, RedisTransactionRepo};
use apotek_types::domain::amount::Amount;
use apotek_types::domain::cart::{CartItem, ProductRef};
use apotek_types::domain::transaction::{Transaction, TransactionItem, TransactionRequest};
use apotek_types::ports::cart_repository::CartRepository;
use apotek_types::ports::transaction_repository::TransactionRepository;
use uuid::Uuid;

async fn repos() -> Option<(RedisTransactionRepo, RedisCartRepo)> {
    let url = std::env::var("REDIS_URL").ok()?;
    let conn = connect(&url).await.expect("redis connect");
    Some((
        RedisTransactionRepo::with_connection(conn.clone()),
        RedisCartRepo::with_connection(conn),
    ))
}

#[tokio::test]
async fn redis_transaction_repo_crud_flow() {
    let Some((repo, _)) = repos().await else {
        return;
    };
    let trx = format!("TEST-{}", Uuid::new_v4());
    let tx = Transaction::new(
        TransactionRequest {
            trx: Some(trx.clone()),
            items: Some(vec![TransactionItem {
                qty: Amount::Int(2),
                price: Amount::Int(750),
                ..Default::default()
            }]),
            payment_method: Some("cash".into()),
            note: None,
        },
        chrono::Utc::now(),
    )
    .unwrap();

    repo.save(tx.clone()).await.unwrap();
    assert_eq!(repo.get(&trx).await.unwrap(), Some(tx.clone()));
    assert!(repo.list().await.unwrap().iter().any(|t| t.trx == trx));

    assert!(repo.delete(&trx).await.unwrap());
    assert!(repo.get(&trx).await.unwrap().is_none());
    assert!(!repo.delete(&trx).await.unwrap());
}

#[tokio::test]
async fn redis_cart_repo_index_operations() {
    let Some((_, repo)) = repos().await else {
        return;
    };
    let trx = format!("TEST-{}", Uuid::new_v4());
    let item = |qty: i64| CartItem {
        product_id: ProductRef::Code("OBT-1".into()),
        qty,
    };
    repo.push(&trx, item(1)).await.unwrap();
    repo.push(&trx, item(2)).await.unwrap();

    assert!(repo.set(&trx, 0, item(5)).await.unwrap());
    assert!(!repo.set(&trx, 9, item(5)).await.unwrap());
    assert_eq!(repo.items(&trx).await.unwrap(), vec![item(5), item(2)]);

    assert!(repo.remove(&trx, 1).await.unwrap());
    assert!(!repo.remove(&trx, 3).await.unwrap());
    assert!(repo.remove(&trx, 0).await.unwrap());
    assert!(repo.items(&trx).await.unwrap().is_empty());
}

#[tokio::test]
async fn redis_cart_remove_targets_the_indexed_duplicate() {
    let Some((_, repo)) = repos().await else {
        return;
    };
    let trx = format!("TEST-{}", Uuid::new_v4());
    let a = CartItem {
        product_id: ProductRef::Id(1),
        qty: 1,
    };
    let b = CartItem {
        product_id: ProductRef::Id(2),
        qty: 1,
    };
    for it in [&a, &b, &a, &b] {
        repo.push(&trx, it.clone()).await.unwrap();
    }

    assert!(repo.remove(&trx, 2).await.unwrap());
    assert_eq!(
        repo.items(&trx).await.unwrap(),
        vec![a.clone(), b.clone(), b.clone()]
    );

    assert!(!repo.remove(&trx, usize::MAX).await.unwrap());
    assert!(!repo.set(&trx, usize::MAX, a.clone()).await.unwrap());
    assert_eq!(repo.items(&trx).await.unwrap().len(), 3);

    assert!(repo.remove(&trx, 1).await.unwrap());
    assert_eq!(repo.items(&trx).await.unwrap(), vec![a, b]);
}
