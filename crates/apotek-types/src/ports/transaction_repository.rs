use async_trait::async_trait;

use super::RepoError;
use crate::domain::transaction::Transaction;

/// Key prefix of stored transactions: `transaction:{trx}`.
pub const TRANSACTION_KEY_PREFIX: &str = "transaction:";

pub fn transaction_key(trx: &str) -> String {
    format!("{TRANSACTION_KEY_PREFIX}{trx}")
}

#[async_trait]
pub trait TransactionRepository: Send + Sync + 'static {
    /// Full scan of every stored transaction. Records that fail to decode are
    /// skipped.
    async fn list(&self) -> Result<Vec<Transaction>, RepoError>;
    async fn get(&self, trx: &str) -> Result<Option<Transaction>, RepoError>;
    /// Writes the record under its `trx`, replacing whatever was there.
    async fn save(&self, transaction: Transaction) -> Result<Transaction, RepoError>;
    async fn delete(&self, trx: &str) -> Result<bool, RepoError>;
}
