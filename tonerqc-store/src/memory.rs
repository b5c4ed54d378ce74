//! In-memory repository implementations.
//!
//! Each repository wraps a `MemTable`, a `RwLock`ed vector that keeps
//! insertion order so listings are stable. [`Store`] bundles one
//! repository per entity and carries the default seed data.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use tonerqc_core::TonerReference;

use crate::entities::{
    ApprovalStatus, Branch, NewApprovalStatus, NewBranch, NewReturnedUnit, NewSector, NewSupplier,
    NewToner, NewUser, NewWarrantyClaim, NewWarrantyStatus, ReturnedUnit, Sector, Supplier, Toner,
    User, WarrantyClaim, WarrantyStatus,
};
use crate::error::StoreError;
use crate::repository::{Repository, ReturnLog, UserRepository};

// ---------------------------------------------------------------------------
// Shared table plumbing
// ---------------------------------------------------------------------------

trait HasId {
    fn id(&self) -> Uuid;
}

macro_rules! has_id {
    ($($entity:ident),+ $(,)?) => {
        $(impl HasId for $entity {
            fn id(&self) -> Uuid {
                self.id
            }
        })+
    };
}

has_id!(
    User,
    Toner,
    Supplier,
    WarrantyStatus,
    ApprovalStatus,
    Branch,
    Sector,
    WarrantyClaim,
    ReturnedUnit,
);

/// Insertion-ordered row storage behind a `RwLock`. Lock poisoning only
/// happens if a writer panics mid-mutation; none of the mutations here
/// can panic, so the poisoned case degrades to taking the inner data.
struct MemTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T: Clone + HasId> MemTable<T> {
    fn new() -> Self {
        MemTable {
            rows: RwLock::new(Vec::new()),
        }
    }

    fn list(&self) -> Vec<T> {
        self.rows
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn get(&self, id: Uuid) -> Option<T> {
        self.rows
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|row| row.id() == id)
            .cloned()
    }

    fn find<F: Fn(&T) -> bool>(&self, pred: F) -> Option<T> {
        self.rows
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|row| pred(row))
            .cloned()
    }

    fn insert(&self, row: T) {
        self.rows
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(row);
    }

    /// Replaces the row with the same id; keeps its position in the
    /// listing order. Returns false if no such row exists.
    fn replace(&self, row: T) -> bool {
        let mut rows = self
            .rows
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match rows.iter_mut().find(|existing| existing.id() == row.id()) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    fn remove(&self, id: Uuid) -> bool {
        let mut rows = self
            .rows
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        rows.len() < before
    }
}

/// Expands to a `Repository` impl where create and update share a
/// single construction expression over `$input`, `$id`, `$now`.
macro_rules! mem_repository {
    (
        $repo:ident, $entity:ident, $new:ident, $name:literal,
        |$input:ident, $id:ident, $now:ident| $build:expr
    ) => {
        pub struct $repo {
            table: MemTable<$entity>,
        }

        impl $repo {
            pub fn new() -> Self {
                $repo {
                    table: MemTable::new(),
                }
            }
        }

        impl Default for $repo {
            fn default() -> Self {
                Self::new()
            }
        }

        #[async_trait]
        impl Repository<$entity, $new> for $repo {
            async fn list(&self) -> Vec<$entity> {
                self.table.list()
            }

            async fn get(&self, id: Uuid) -> Result<$entity, StoreError> {
                self.table
                    .get(id)
                    .ok_or_else(|| StoreError::not_found($name, id))
            }

            async fn create(&self, $input: $new) -> Result<$entity, StoreError> {
                let $id = Uuid::new_v4();
                let $now = Utc::now();
                let row = $build;
                self.table.insert(row.clone());
                Ok(row)
            }

            async fn update(&self, id: Uuid, $input: $new) -> Result<$entity, StoreError> {
                let current = self
                    .table
                    .get(id)
                    .ok_or_else(|| StoreError::not_found($name, id))?;
                let $id = id;
                let $now = current.created_at;
                let row = $build;
                self.table.replace(row.clone());
                Ok(row)
            }

            async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
                if self.table.remove(id) {
                    Ok(())
                } else {
                    Err(StoreError::not_found($name, id))
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Simple catalog repositories
// ---------------------------------------------------------------------------

mem_repository!(
    MemSuppliers, Supplier, NewSupplier, "supplier",
    |input, id, now| Supplier {
        id,
        name: input.name,
        phone: input.phone,
        rma_link: input.rma_link,
        created_at: now,
    }
);

mem_repository!(
    MemWarrantyStatuses, WarrantyStatus, NewWarrantyStatus, "warranty status",
    |input, id, now| WarrantyStatus {
        id,
        status: input.status,
        created_at: now,
    }
);

mem_repository!(
    MemApprovalStatuses, ApprovalStatus, NewApprovalStatus, "approval status",
    |input, id, now| ApprovalStatus {
        id,
        status: input.status,
        created_at: now,
    }
);

mem_repository!(
    MemBranches, Branch, NewBranch, "branch",
    |input, id, now| Branch {
        id,
        name: input.name,
        created_at: now,
    }
);

mem_repository!(
    MemSectors, Sector, NewSector, "sector",
    |input, id, now| Sector {
        id,
        name: input.name,
        created_at: now,
    }
);

mem_repository!(
    MemWarrantyClaims, WarrantyClaim, NewWarrantyClaim, "warranty claim",
    |input, id, now| WarrantyClaim {
        id,
        items: input.items,
        purchase_invoice: input.purchase_invoice,
        purchase_invoice_attachment: input.purchase_invoice_attachment,
        supplier_id: input.supplier_id,
        status_id: input.status_id,
        shipping_invoice: input.shipping_invoice,
        shipping_invoice_attachment: input.shipping_invoice_attachment,
        return_invoice: input.return_invoice,
        return_invoice_attachment: input.return_invoice_attachment,
        serial_number: input.serial_number,
        lot: input.lot,
        supplier_ticket: input.supplier_ticket,
        created_at: now,
    }
);

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub struct MemUsers {
    table: MemTable<User>,
}

impl MemUsers {
    pub fn new() -> Self {
        MemUsers {
            table: MemTable::new(),
        }
    }

    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.table
            .find(|user| {
                user.email.eq_ignore_ascii_case(email) && Some(user.id) != except
            })
            .is_some()
    }
}

impl Default for MemUsers {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<User, NewUser> for MemUsers {
    async fn list(&self) -> Vec<User> {
        self.table.list()
    }

    async fn get(&self, id: Uuid) -> Result<User, StoreError> {
        self.table
            .get(id)
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    async fn create(&self, input: NewUser) -> Result<User, StoreError> {
        if self.email_taken(&input.email, None) {
            return Err(StoreError::DuplicateEmail { email: input.email });
        }
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            password: input.password,
            permissions: input.permissions,
            modules: input.modules,
            active: input.active,
            created_at: Utc::now(),
        };
        self.table.insert(user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, input: NewUser) -> Result<User, StoreError> {
        let current = self
            .table
            .get(id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        if self.email_taken(&input.email, Some(id)) {
            return Err(StoreError::DuplicateEmail { email: input.email });
        }
        let user = User {
            id,
            name: input.name,
            email: input.email,
            password: input.password,
            permissions: input.permissions,
            modules: input.modules,
            active: input.active,
            created_at: current.created_at,
        };
        self.table.replace(user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        if self.table.remove(id) {
            Ok(())
        } else {
            Err(StoreError::not_found("user", id))
        }
    }
}

#[async_trait]
impl UserRepository for MemUsers {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.table.find(|user| user.email.eq_ignore_ascii_case(email))
    }
}

// ---------------------------------------------------------------------------
// Toner catalog
// ---------------------------------------------------------------------------

pub struct MemToners {
    table: MemTable<Toner>,
}

impl MemToners {
    pub fn new() -> Self {
        MemToners {
            table: MemTable::new(),
        }
    }

    fn build_reference(input: &NewToner) -> Result<TonerReference, StoreError> {
        Ok(TonerReference::new(
            input.model.clone(),
            input.empty_weight_g,
            input.full_weight_g,
            input.sheet_capacity,
            input.unit_price,
        )?)
    }
}

impl Default for MemToners {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Toner, NewToner> for MemToners {
    async fn list(&self) -> Vec<Toner> {
        self.table.list()
    }

    async fn get(&self, id: Uuid) -> Result<Toner, StoreError> {
        self.table
            .get(id)
            .ok_or_else(|| StoreError::not_found("toner", id))
    }

    async fn create(&self, input: NewToner) -> Result<Toner, StoreError> {
        let reference = Self::build_reference(&input)?;
        let toner = Toner {
            id: Uuid::new_v4(),
            reference,
            color: input.color,
            kind: input.kind,
            created_at: Utc::now(),
        };
        self.table.insert(toner.clone());
        Ok(toner)
    }

    /// Edits rebuild the whole reference through the factory, so the
    /// derived fields can never go stale relative to the primaries.
    async fn update(&self, id: Uuid, input: NewToner) -> Result<Toner, StoreError> {
        let current = self
            .table
            .get(id)
            .ok_or_else(|| StoreError::not_found("toner", id))?;
        let reference = Self::build_reference(&input)?;
        let toner = Toner {
            id,
            reference,
            color: input.color,
            kind: input.kind,
            created_at: current.created_at,
        };
        self.table.replace(toner.clone());
        Ok(toner)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        if self.table.remove(id) {
            Ok(())
        } else {
            Err(StoreError::not_found("toner", id))
        }
    }
}

// ---------------------------------------------------------------------------
// Return log
// ---------------------------------------------------------------------------

pub struct MemReturns {
    table: MemTable<ReturnedUnit>,
}

impl MemReturns {
    pub fn new() -> Self {
        MemReturns {
            table: MemTable::new(),
        }
    }
}

impl Default for MemReturns {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReturnLog for MemReturns {
    async fn record(&self, input: NewReturnedUnit) -> Result<ReturnedUnit, StoreError> {
        let unit = ReturnedUnit {
            id: Uuid::new_v4(),
            toner_id: input.toner_id,
            client_code: input.client_code,
            branch: input.branch,
            returned_weight_g: input.returned_weight_g,
            present_fill_mass_g: input.present_fill_mass_g,
            fill_percentage: input.fill_percentage,
            disposition: input.disposition,
            recovered_value: input.recovered_value,
            created_at: Utc::now(),
        };
        self.table.insert(unit.clone());
        Ok(unit)
    }

    async fn list(&self) -> Vec<ReturnedUnit> {
        self.table.list()
    }

    async fn get(&self, id: Uuid) -> Result<ReturnedUnit, StoreError> {
        self.table
            .get(id)
            .ok_or_else(|| StoreError::not_found("returned unit", id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        if self.table.remove(id) {
            Ok(())
        } else {
            Err(StoreError::not_found("returned unit", id))
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// Every repository the application needs, constructed together and
/// handed to the server explicitly.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<MemUsers>,
    pub toners: Arc<MemToners>,
    pub suppliers: Arc<MemSuppliers>,
    pub warranty_statuses: Arc<MemWarrantyStatuses>,
    pub approval_statuses: Arc<MemApprovalStatuses>,
    pub branches: Arc<MemBranches>,
    pub sectors: Arc<MemSectors>,
    pub warranty_claims: Arc<MemWarrantyClaims>,
    pub returns: Arc<MemReturns>,
}

impl Store {
    pub fn new() -> Self {
        Store {
            users: Arc::new(MemUsers::new()),
            toners: Arc::new(MemToners::new()),
            suppliers: Arc::new(MemSuppliers::new()),
            warranty_statuses: Arc::new(MemWarrantyStatuses::new()),
            approval_statuses: Arc::new(MemApprovalStatuses::new()),
            branches: Arc::new(MemBranches::new()),
            sectors: Arc::new(MemSectors::new()),
            warranty_claims: Arc::new(MemWarrantyClaims::new()),
            returns: Arc::new(MemReturns::new()),
        }
    }

    /// Load the out-of-the-box records: one administrator with every
    /// permission and module, the standard warranty and approval
    /// pipeline steps, and the initial branches.
    pub async fn seed(&self) -> Result<(), StoreError> {
        self.users
            .create(NewUser {
                name: "Administrador".to_string(),
                email: "admin@sistema.com".to_string(),
                password: "123456".to_string(),
                permissions: ["create", "read", "update", "delete", "export"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                modules: [
                    "dashboard",
                    "users",
                    "toners",
                    "suppliers",
                    "returns",
                    "warranties",
                    "warranty-status",
                    "approval-status",
                    "branches",
                    "sectors",
                    "five-s",
                    "disc",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
                active: true,
            })
            .await?;

        for status in [
            "Awaiting shipment to supplier",
            "Awaiting pickup",
            "In process",
        ] {
            self.warranty_statuses
                .create(NewWarrantyStatus {
                    status: status.to_string(),
                })
                .await?;
        }

        for status in ["Approved", "Rejected", "In progress"] {
            self.approval_statuses
                .create(NewApprovalStatus {
                    status: status.to_string(),
                })
                .await?;
        }

        for name in [
            "Headquarters - São Paulo",
            "Branch - Rio de Janeiro",
            "Branch - Belo Horizonte",
        ] {
            self.branches
                .create(NewBranch {
                    name: name.to_string(),
                })
                .await?;
        }

        Ok(())
    }

    /// Convenience for tests and the server binary.
    pub async fn seeded() -> Result<Self, StoreError> {
        let store = Store::new();
        store.seed().await?;
        Ok(store)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Disposition;

    fn sample_toner() -> NewToner {
        NewToner {
            model: "HP CF283A".to_string(),
            empty_weight_g: 50.0,
            full_weight_g: 900.0,
            sheet_capacity: 1600,
            unit_price: 80.0,
            color: "black".to_string(),
            kind: "original".to_string(),
        }
    }

    #[tokio::test]
    async fn toner_create_derives_reference_fields() {
        let toners = MemToners::new();
        let toner = toners.create(sample_toner()).await.unwrap();
        assert!((toner.reference.total_fill_mass_g() - 850.0).abs() < 1e-9);
        assert!((toner.reference.price_per_sheet() - 0.05).abs() < 1e-9);
    }

    #[tokio::test]
    async fn toner_update_rebuilds_reference_or_leaves_row_alone() {
        let toners = MemToners::new();
        let toner = toners.create(sample_toner()).await.unwrap();

        let mut edit = sample_toner();
        edit.unit_price = 96.0;
        let edited = toners.update(toner.id, edit).await.unwrap();
        assert!((edited.reference.price_per_sheet() - 0.06).abs() < 1e-9);
        assert_eq!(edited.created_at, toner.created_at);

        // A rejected edit must not touch the stored row.
        let mut bad = sample_toner();
        bad.full_weight_g = 10.0;
        let err = toners.update(toner.id, bad).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidReference(_)));
        let current = toners.get(toner.id).await.unwrap();
        assert!((current.reference.price_per_sheet() - 0.06).abs() < 1e-9);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let users = MemUsers::new();
        users
            .create(NewUser {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                password: "pw".to_string(),
                permissions: vec![],
                modules: vec![],
                active: true,
            })
            .await
            .unwrap();

        let err = users
            .create(NewUser {
                name: "Other".to_string(),
                email: "ANA@example.com".to_string(),
                password: "pw".to_string(),
                permissions: vec![],
                modules: vec![],
                active: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail { .. }));
    }

    #[tokio::test]
    async fn user_update_may_keep_its_own_email() {
        let users = MemUsers::new();
        let user = users
            .create(NewUser {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                password: "pw".to_string(),
                permissions: vec![],
                modules: vec![],
                active: true,
            })
            .await
            .unwrap();

        let updated = users
            .update(
                user.id,
                NewUser {
                    name: "Ana Souza".to_string(),
                    email: "ana@example.com".to_string(),
                    password: "pw2".to_string(),
                    permissions: vec!["read".to_string()],
                    modules: vec![],
                    active: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ana Souza");
        assert!(!updated.active);
    }

    #[tokio::test]
    async fn missing_rows_surface_as_not_found() {
        let branches = MemBranches::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            branches.get(id).await.unwrap_err(),
            StoreError::NotFound { entity: "branch", .. }
        ));
        assert!(branches.delete(id).await.is_err());
    }

    #[tokio::test]
    async fn return_log_records_and_lists_in_order() {
        let log = MemReturns::new();
        let toner_id = Uuid::new_v4();
        for (code, pct) in [("C-001", 80), ("C-002", 3)] {
            log.record(NewReturnedUnit {
                toner_id,
                client_code: code.to_string(),
                branch: "Headquarters - São Paulo".to_string(),
                returned_weight_g: 730.0,
                present_fill_mass_g: 680.0,
                fill_percentage: pct,
                disposition: Disposition::Stock,
                recovered_value: Some(64.0),
            })
            .await
            .unwrap();
        }
        let listed = log.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].client_code, "C-001");
        assert_eq!(listed[1].client_code, "C-002");
    }

    #[tokio::test]
    async fn seed_loads_admin_and_pipeline_steps() {
        let store = Store::seeded().await.unwrap();

        let admin = store
            .users
            .find_by_email("admin@sistema.com")
            .await
            .unwrap();
        assert_eq!(admin.permissions.len(), 5);
        assert_eq!(admin.modules.len(), 12);

        assert_eq!(store.warranty_statuses.list().await.len(), 3);
        assert_eq!(store.approval_statuses.list().await.len(), 3);
        assert_eq!(store.branches.list().await.len(), 3);
        assert!(store.toners.list().await.is_empty());
    }
}
