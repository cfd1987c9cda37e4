use async_trait::async_trait;

use super::RepoError;
use crate::domain::user::{NewUser, User, UserUpdate};

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// All users ordered by ascending id.
    async fn list(&self) -> Result<Vec<User>, RepoError>;
    async fn get(&self, id: i64) -> Result<Option<User>, RepoError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
    async fn update(&self, id: i64, update: UserUpdate) -> Result<Option<User>, RepoError>;
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
}
