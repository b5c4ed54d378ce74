//! Store error types.

use thiserror::Error;
use uuid::Uuid;

use tonerqc_core::InvalidReference;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("a user with email {email} already exists")]
    DuplicateEmail { email: String },

    /// Catalog rows are built through the reference factory; bad primary
    /// inputs surface as this configuration error.
    #[error("invalid toner reference: {0}")]
    InvalidReference(#[from] InvalidReference),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        StoreError::NotFound { entity, id }
    }
}
