//! Administrative record deletion.
//!
//! A single tagged request names the entity kind and the id, so the
//! admin endpoint cannot be pointed at a table that was never meant to
//! be deletable, and an unknown kind fails at deserialization.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::StoreError;
use crate::memory::Store;
use crate::repository::{Repository, ReturnLog};

/// Which record an administrator wants removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "entity", content = "id", rename_all = "snake_case")]
pub enum DeleteTarget {
    User(Uuid),
    Toner(Uuid),
    Supplier(Uuid),
    WarrantyStatus(Uuid),
    ApprovalStatus(Uuid),
    Branch(Uuid),
    Sector(Uuid),
    WarrantyClaim(Uuid),
    ReturnedUnit(Uuid),
}

/// Dispatch a deletion to the matching repository.
pub async fn delete_record(store: &Store, target: DeleteTarget) -> Result<(), StoreError> {
    match target {
        DeleteTarget::User(id) => store.users.delete(id).await,
        DeleteTarget::Toner(id) => store.toners.delete(id).await,
        DeleteTarget::Supplier(id) => store.suppliers.delete(id).await,
        DeleteTarget::WarrantyStatus(id) => store.warranty_statuses.delete(id).await,
        DeleteTarget::ApprovalStatus(id) => store.approval_statuses.delete(id).await,
        DeleteTarget::Branch(id) => store.branches.delete(id).await,
        DeleteTarget::Sector(id) => store.sectors.delete(id).await,
        DeleteTarget::WarrantyClaim(id) => store.warranty_claims.delete(id).await,
        DeleteTarget::ReturnedUnit(id) => store.returns.delete(id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewBranch;

    #[test]
    fn target_deserializes_from_tagged_json() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"entity":"warranty_status","id":"{id}"}}"#);
        let target: DeleteTarget = serde_json::from_str(&json).unwrap();
        assert_eq!(target, DeleteTarget::WarrantyStatus(id));

        let bad = serde_json::from_str::<DeleteTarget>(
            r#"{"entity":"audit_log","id":"00000000-0000-0000-0000-000000000000"}"#,
        );
        assert!(bad.is_err());
    }

    #[tokio::test]
    async fn delete_dispatches_to_the_named_table() {
        let store = Store::new();
        let branch = store
            .branches
            .create(NewBranch {
                name: "Branch - Curitiba".to_string(),
            })
            .await
            .unwrap();

        delete_record(&store, DeleteTarget::Branch(branch.id))
            .await
            .unwrap();
        assert!(store.branches.list().await.is_empty());

        // Same id under a different entity tag is a not-found, not a
        // cross-table delete.
        let err = delete_record(&store, DeleteTarget::Sector(branch.id))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "sector", .. }));
    }
}
