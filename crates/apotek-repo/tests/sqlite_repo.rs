#![cfg(feature = "sqlite")]

use apotek_repo::sqlite::{
    SqliteAccountRepo, SqliteOrderRepo, SqliteProductRepo, SqliteReviewRepo, SqliteUserRepo,
};
use apotek_types::domain::account::NewAccount;
use apotek_types::domain::product::NewProduct;
use apotek_types::domain::review::{Review, ReviewEdit};
use apotek_types::domain::user::{NewUser, UserProfile, UserUpdate};
use apotek_types::ports::account_repository::AccountRepository;
use apotek_types::ports::order_repository::OrderRepository;
use apotek_types::ports::product_repository::ProductRepository;
use apotek_types::ports::review_repository::ReviewRepository;
use apotek_types::ports::user_repository::UserRepository;
use std::path::PathBuf;
use uuid::Uuid;

fn temp_db_url(name: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut path = PathBuf::from(dir.path());
    path.push(format!("{name}-{}.db", Uuid::new_v4()));
    let url = format!("sqlite://{}", path.display());
    (dir, url)
}

fn profile(email: &str) -> UserProfile {
    UserProfile {
        name: "Test".into(),
        role: "kasir".into(),
        email: email.into(),
        phone: "0811".into(),
        shift: "malam".into(),
    }
}

#[tokio::test]
async fn sqlite_user_repo_crud_flow() {
    let (_dir, url) = temp_db_url("users");
    let repo = SqliteUserRepo::new(&url).await.unwrap();

    let created = repo
        .create(NewUser {
            profile: profile("test@example.com"),
            password_hash: "hash-1".into(),
        })
        .await
        .unwrap();

    let fetched = repo.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    let updated = repo
        .update(
            created.id,
            UserUpdate {
                profile: profile("new@example.com"),
                password_hash: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.email, "new@example.com");
    assert_eq!(updated.password_hash, "hash-1");

    let rehashed = repo
        .update(
            created.id,
            UserUpdate {
                profile: profile("new@example.com"),
                password_hash: Some("hash-2".into()),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rehashed.password_hash, "hash-2");

    assert_eq!(repo.list().await.unwrap().len(), 1);
    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.get(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_user_repo_enforces_unique_email() {
    let (_dir, url) = temp_db_url("users");
    let repo = SqliteUserRepo::new(&url).await.unwrap();
    let new = || NewUser {
        profile: profile("dup@example.com"),
        password_hash: "hash".into(),
    };
    repo.create(new()).await.unwrap();
    let err = repo.create(new()).await.unwrap_err();
    assert!(err.to_string().contains("UNIQUE"));
}

#[tokio::test]
async fn sqlite_repos_handle_missing_rows() {
    let (_dir, url) = temp_db_url("products");
    let products = SqliteProductRepo::new(&url).await.unwrap();
    assert!(products.get(99).await.unwrap().is_none());
    let new = NewProduct {
        name: "X".into(),
        category: "Y".into(),
        price: 1,
        stock: 1,
    };
    assert!(products.update(99, new).await.unwrap().is_none());
    assert!(!products.delete(99).await.unwrap());

    let (_dir, url) = temp_db_url("users");
    let users = SqliteUserRepo::new(&url).await.unwrap();
    assert!(users.get(99).await.unwrap().is_none());
    assert!(!users.delete(99).await.unwrap());
}

#[tokio::test]
async fn sqlite_product_repo_crud_flow() {
    let (_dir, url) = temp_db_url("products");
    let repo = SqliteProductRepo::new(&url).await.unwrap();

    let created = repo
        .create(NewProduct {
            name: "Paracetamol".into(),
            category: "obat bebas".into(),
            price: 5000,
            stock: 20,
        })
        .await
        .unwrap();
    assert_eq!(repo.get(created.id).await.unwrap().unwrap(), created);

    let updated = repo
        .update(
            created.id,
            NewProduct {
                name: "Paracetamol 500mg".into(),
                category: "obat bebas".into(),
                price: 5500,
                stock: 18,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(repo.get(created.id).await.unwrap().unwrap(), updated);
    assert_eq!(repo.list().await.unwrap().len(), 1);

    assert!(repo.delete(created.id).await.unwrap());
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_account_repo_finds_all_matches() {
    let (_dir, url) = temp_db_url("auth");
    let repo = SqliteAccountRepo::new(&url).await.unwrap();
    for name in ["A", "B"] {
        repo.create(NewAccount {
            name: name.into(),
            email: "same@example.com".into(),
            password_hash: "hash".into(),
        })
        .await
        .unwrap();
    }
    let found = repo.find_by_email("same@example.com").await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(repo
        .find_by_email("other@example.com")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn sqlite_order_repo_returns_every_column() {
    let (_dir, url) = temp_db_url("orders");
    let repo = SqliteOrderRepo::new(&url).await.unwrap();
    sqlx::query(
        "INSERT INTO orders (customer_name, product_id, qty, total, status) VALUES (?, ?, ?, ?, ?)",
    )
    .bind("Rina")
    .bind(3_i64)
    .bind(2_i64)
    .bind(10000_i64)
    .bind(Option::<String>::None)
    .execute(repo.pool())
    .await
    .unwrap();

    let rows = repo.list().await.unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get("customer_name").unwrap(), "Rina");
    assert_eq!(row.get("total").unwrap(), 10000);
    assert!(row.get("status").unwrap().is_null());
    assert!(row.get("created_at").unwrap().is_string());
}

#[tokio::test]
async fn sqlite_review_repo_crud_flow() {
    let (_dir, url) = temp_db_url("reviews");
    let repo = SqliteReviewRepo::new(&url).await.unwrap();
    let review = Review {
        id: Uuid::new_v4().to_string(),
        product_id: 7,
        review: "cepat sembuh".into(),
        rating: 5,
    };
    repo.create(review.clone()).await.unwrap();
    assert_eq!(repo.list_by_product(7).await.unwrap(), vec![review.clone()]);
    assert!(repo.list_by_product(8).await.unwrap().is_empty());

    let edit = ReviewEdit {
        review: "lumayan".into(),
        rating: 3,
    };
    assert!(repo.update(&review.id, edit.clone()).await.unwrap());
    assert!(!repo.update("missing", edit).await.unwrap());
    assert_eq!(repo.list().await.unwrap()[0].rating, 3);

    assert!(repo.delete(&review.id).await.unwrap());
    assert!(!repo.delete(&review.id).await.unwrap());
}
