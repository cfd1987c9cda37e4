//! Storage adapters. `memory` backs every port; `sqlite` replaces it for the
//! relational stores and `redis` for the key-value stores.

#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a relational repo feature: `memory` or `sqlite`.");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!("Enable a key-value repo feature: `memory` or `redis`.");

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub const DEFAULT_ACCOUNTS_URL: &str = "sqlite://data/auth.db";
pub const DEFAULT_USERS_URL: &str = "sqlite://data/users.db";
pub const DEFAULT_PRODUCTS_URL: &str = "sqlite://data/products.db";
pub const DEFAULT_ORDERS_URL: &str = "sqlite://data/orders.db";
pub const DEFAULT_REVIEWS_URL: &str = "sqlite://data/reviews.db";
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

// When both relational adapters are compiled in, sqlite wins.
#[cfg(feature = "sqlite")]
mod relational {
    pub use crate::sqlite::{
        SqliteAccountRepo as AccountRepo, SqliteOrderRepo as OrderRepo,
        SqliteProductRepo as ProductRepo, SqliteReviewRepo as ReviewRepo,
        SqliteUserRepo as UserRepo,
    };
}

#[cfg(not(feature = "sqlite"))]
mod relational {
    pub use crate::memory::{
        InMemoryAccountRepo as AccountRepo, InMemoryOrderRepo as OrderRepo,
        InMemoryProductRepo as ProductRepo, InMemoryReviewRepo as ReviewRepo,
        InMemoryUserRepo as UserRepo,
    };
}

#[cfg(feature = "redis")]
mod key_value {
    pub use crate::redis::{RedisCartRepo as CartRepo, RedisTransactionRepo as TransactionRepo};
}

#[cfg(not(feature = "redis"))]
mod key_value {
    pub use crate::memory::{
        InMemoryCartRepo as CartRepo, InMemoryTransactionRepo as TransactionRepo,
    };
}

pub use key_value::{CartRepo, TransactionRepo};
pub use relational::{AccountRepo, OrderRepo, ProductRepo, ReviewRepo, UserRepo};

#[cfg(feature = "sqlite")]
pub async fn build_account_repo(database_url: Option<&str>) -> anyhow::Result<AccountRepo> {
    AccountRepo::new(database_url.unwrap_or(DEFAULT_ACCOUNTS_URL)).await
}

#[cfg(not(feature = "sqlite"))]
pub async fn build_account_repo(_: Option<&str>) -> anyhow::Result<AccountRepo> {
    Ok(AccountRepo::new())
}

#[cfg(feature = "sqlite")]
pub async fn build_user_repo(database_url: Option<&str>) -> anyhow::Result<UserRepo> {
    UserRepo::new(database_url.unwrap_or(DEFAULT_USERS_URL)).await
}

#[cfg(not(feature = "sqlite"))]
pub async fn build_user_repo(_: Option<&str>) -> anyhow::Result<UserRepo> {
    Ok(UserRepo::new())
}

#[cfg(feature = "sqlite")]
pub async fn build_product_repo(database_url: Option<&str>) -> anyhow::Result<ProductRepo> {
    ProductRepo::new(database_url.unwrap_or(DEFAULT_PRODUCTS_URL)).await
}

#[cfg(not(feature = "sqlite"))]
pub async fn build_product_repo(_: Option<&str>) -> anyhow::Result<ProductRepo> {
    Ok(ProductRepo::new())
}

#[cfg(feature = "sqlite")]
pub async fn build_order_repo(database_url: Option<&str>) -> anyhow::Result<OrderRepo> {
    OrderRepo::new(database_url.unwrap_or(DEFAULT_ORDERS_URL)).await
}

#[cfg(not(feature = "sqlite"))]
pub async fn build_order_repo(_: Option<&str>) -> anyhow::Result<OrderRepo> {
    Ok(OrderRepo::new())
}

#[cfg(feature = "sqlite")]
pub async fn build_review_repo(database_url: Option<&str>) -> anyhow::Result<ReviewRepo> {
    ReviewRepo::new(database_url.unwrap_or(DEFAULT_REVIEWS_URL)).await
}

#[cfg(not(feature = "sqlite"))]
pub async fn build_review_repo(_: Option<&str>) -> anyhow::Result<ReviewRepo> {
    Ok(ReviewRepo::new())
}

/// Transactions and carts live in the same key-value store and share one
/// connection.
#[cfg(feature = "redis")]
pub async fn build_kv_repos(
    redis_url: Option<&str>,
) -> anyhow::Result<(TransactionRepo, CartRepo)> {
    let connection = crate::redis::connect(redis_url.unwrap_or(DEFAULT_REDIS_URL)).await?;
    Ok((
        TransactionRepo::with_connection(connection.clone()),
        CartRepo::with_connection(connection),
    ))
}

#[cfg(not(feature = "redis"))]
pub async fn build_kv_repos(_: Option<&str>) -> anyhow::Result<(TransactionRepo, CartRepo)> {
    Ok((TransactionRepo::new(), CartRepo::new()))
}
