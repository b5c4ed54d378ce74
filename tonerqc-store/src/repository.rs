//! Repository traits.
//!
//! One trait per persistence concern. Handlers and workflows receive
//! these as `Arc<dyn ...>`, so a backend swap never touches callers.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{NewReturnedUnit, NewUser, ReturnedUnit, User};
use crate::error::StoreError;

/// CRUD surface shared by every editable catalog entity.
#[async_trait]
pub trait Repository<T, N>: Send + Sync {
    async fn list(&self) -> Vec<T>;
    async fn get(&self, id: Uuid) -> Result<T, StoreError>;
    async fn create(&self, input: N) -> Result<T, StoreError>;
    async fn update(&self, id: Uuid, input: N) -> Result<T, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// User storage; adds the email lookup the login flow needs.
#[async_trait]
pub trait UserRepository: Repository<User, NewUser> {
    async fn find_by_email(&self, email: &str) -> Option<User>;
}

/// Append-only log of processed returns. There is deliberately no
/// update operation: a recorded outcome is immutable, and corrections
/// go through admin deletion plus reprocessing.
#[async_trait]
pub trait ReturnLog: Send + Sync {
    async fn record(&self, input: NewReturnedUnit) -> Result<ReturnedUnit, StoreError>;
    async fn list(&self) -> Vec<ReturnedUnit>;
    async fn get(&self, id: Uuid) -> Result<ReturnedUnit, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}
