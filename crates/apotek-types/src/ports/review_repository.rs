use async_trait::async_trait;

use super::RepoError;
use crate::domain::review::{Review, ReviewEdit};

#[async_trait]
pub trait ReviewRepository: Send + Sync + 'static {
    async fn create(&self, review: Review) -> Result<Review, RepoError>;
    async fn list(&self) -> Result<Vec<Review>, RepoError>;
    async fn list_by_product(&self, product_id: i64) -> Result<Vec<Review>, RepoError>;
    /// `false` when no review has this id.
    async fn update(&self, id: &str, edit: ReviewEdit) -> Result<bool, RepoError>;
    async fn delete(&self, id: &str) -> Result<bool, RepoError>;
}
