//! Entities and repositories for the toner quality-management system.
//!
//! One repository trait per entity, constructed and injected explicitly
//! (no process-wide storage singleton). The in-memory implementations in
//! [`memory`] are the only backend; they make no durability or
//! concurrent-write-arbitration promises beyond what a shared async
//! server needs.

pub mod admin;
pub mod entities;
pub mod error;
pub mod memory;
pub mod repository;

pub use admin::{delete_record, DeleteTarget};
pub use error::StoreError;
pub use memory::Store;
pub use repository::{Repository, ReturnLog, UserRepository};
