//! Persisted entity types and their creation inputs.
//!
//! Entity structs carry server-assigned `id` and `created_at`; the
//! matching `New*` structs are what callers (and the HTTP layer) submit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tonerqc_core::TonerReference;

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub permissions: Vec<String>,
    pub modules: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// What the API returns for a user: everything except the password.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub permissions: Vec<String>,
    pub modules: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            permissions: user.permissions.clone(),
            modules: user.modules.clone(),
            active: user.active,
            created_at: user.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Toner catalog
// ---------------------------------------------------------------------------

/// A catalog row: the calculation reference plus presentation attributes.
/// The reference (and with it every derived field) is rebuilt through the
/// core factory on each edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toner {
    pub id: Uuid,
    #[serde(flatten)]
    pub reference: TonerReference,
    pub color: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewToner {
    pub model: String,
    pub empty_weight_g: f64,
    pub full_weight_g: f64,
    pub sheet_capacity: u32,
    pub unit_price: f64,
    pub color: String,
    pub kind: String,
}

// ---------------------------------------------------------------------------
// Suppliers and statuses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub rma_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub rma_link: Option<String>,
}

/// A step in the supplier-warranty pipeline, e.g. "awaiting shipment".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyStatus {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewWarrantyStatus {
    pub status: String,
}

/// A step in the product-approval (homologation) workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalStatus {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewApprovalStatus {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Returned units
// ---------------------------------------------------------------------------

/// Operational decision for a returned unit, chosen by a human operator
/// after seeing the classification. Any choice is accepted regardless of
/// the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Discard,
    Stock,
    Warranty,
    InternalUse,
}

/// The persisted outcome of processing one returned unit. Created once,
/// immutable thereafter: the repository offers no update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnedUnit {
    pub id: Uuid,
    pub toner_id: Uuid,
    pub client_code: String,
    pub branch: String,
    pub returned_weight_g: f64,
    pub present_fill_mass_g: f64,
    pub fill_percentage: i32,
    pub disposition: Disposition,
    /// Only present when the disposition is stock.
    pub recovered_value: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Fully-computed record the returns workflow hands to the log.
#[derive(Debug, Clone)]
pub struct NewReturnedUnit {
    pub toner_id: Uuid,
    pub client_code: String,
    pub branch: String,
    pub returned_weight_g: f64,
    pub present_fill_mass_g: f64,
    pub fill_percentage: i32,
    pub disposition: Disposition,
    pub recovered_value: Option<f64>,
}

// ---------------------------------------------------------------------------
// Warranty claims
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyItem {
    pub quantity: u32,
    pub description: String,
    pub unit_value: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyClaim {
    pub id: Uuid,
    pub items: Vec<WarrantyItem>,
    pub purchase_invoice: String,
    pub purchase_invoice_attachment: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub status_id: Option<Uuid>,
    pub shipping_invoice: Option<String>,
    pub shipping_invoice_attachment: Option<String>,
    pub return_invoice: Option<String>,
    pub return_invoice_attachment: Option<String>,
    pub serial_number: Option<String>,
    pub lot: Option<String>,
    pub supplier_ticket: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewWarrantyClaim {
    pub items: Vec<WarrantyItem>,
    pub purchase_invoice: String,
    #[serde(default)]
    pub purchase_invoice_attachment: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<Uuid>,
    #[serde(default)]
    pub status_id: Option<Uuid>,
    #[serde(default)]
    pub shipping_invoice: Option<String>,
    #[serde(default)]
    pub shipping_invoice_attachment: Option<String>,
    #[serde(default)]
    pub return_invoice: Option<String>,
    #[serde(default)]
    pub return_invoice_attachment: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub supplier_ticket: Option<String>,
}

// ---------------------------------------------------------------------------
// Branches and sectors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBranch {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSector {
    pub name: String,
}
