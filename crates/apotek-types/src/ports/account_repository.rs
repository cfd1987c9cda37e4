use async_trait::async_trait;

use super::RepoError;
use crate::domain::account::{Account, NewAccount};

#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    async fn create(&self, account: NewAccount) -> Result<Account, RepoError>;
    /// Every account registered under `email`, oldest first.
    async fn find_by_email(&self, email: &str) -> Result<Vec<Account>, RepoError>;
}
