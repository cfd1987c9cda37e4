use async_trait::async_trait;

use super::RepoError;
use crate::domain::cart::CartItem;

/// Key prefix of stored carts: `cart:{trx}`.
pub const CART_KEY_PREFIX: &str = "cart:";

pub fn cart_key(trx: &str) -> String {
    format!("{CART_KEY_PREFIX}{trx}")
}

#[async_trait]
pub trait CartRepository: Send + Sync + 'static {
    async fn push(&self, trx: &str, item: CartItem) -> Result<(), RepoError>;
    async fn items(&self, trx: &str) -> Result<Vec<CartItem>, RepoError>;
    /// `false` when `index` is out of range.
    async fn set(&self, trx: &str, index: usize, item: CartItem) -> Result<bool, RepoError>;
    /// `false` when `index` is out of range.
    async fn remove(&self, trx: &str, index: usize) -> Result<bool, RepoError>;
}
