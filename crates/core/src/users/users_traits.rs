use crate::errors::Result;
use crate::users::{NewUser, User};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>>;
    async fn insert_new_user(&self, new_user: NewUser) -> Result<User>;
}
