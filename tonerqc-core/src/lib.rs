//! Gramatura (toner fill) classification and recovery-value engine.
//!
//! The returns bench weighs a returned cartridge; this crate turns that
//! weight plus the toner model's reference attributes into a fill
//! percentage, a disposition recommendation, and (for units going back to
//! stock) an estimated recovered monetary value.
//!
//! Everything here is pure and synchronous: no I/O, no shared state, no
//! clocks. The surrounding workflow supplies fully-resolved reference
//! data and persists the outcome.

pub mod classifier;
pub mod error;
pub mod reference;
pub mod valuator;

pub use classifier::{classify, classify_against, FillClassification, PresentationCategory};
pub use error::InvalidReference;
pub use reference::TonerReference;
pub use valuator::recovered_value;
