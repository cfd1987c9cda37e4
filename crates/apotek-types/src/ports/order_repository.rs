use async_trait::async_trait;

use super::RepoError;
use crate::domain::order::Order;

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Order>, RepoError>;
}
