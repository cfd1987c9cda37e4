use async_trait::async_trait;

use super::RepoError;
use crate::domain::product::{NewProduct, Product};

#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Product>, RepoError>;
    async fn get(&self, id: i64) -> Result<Option<Product>, RepoError>;
    async fn create(&self, product: NewProduct) -> Result<Product, RepoError>;
    async fn update(&self, id: i64, product: NewProduct) -> Result<Option<Product>, RepoError>;
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
}
