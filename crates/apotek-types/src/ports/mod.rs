pub mod account_repository;
pub mod cart_repository;
pub mod order_repository;
pub mod product_repository;
pub mod review_repository;
pub mod transaction_repository;
pub mod user_repository;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),
}

impl RepoError {
    /// The driver message without the `db error:` prefix.
    pub fn message(&self) -> &str {
        match self {
            RepoError::DbError(m) => m,
        }
    }
}
