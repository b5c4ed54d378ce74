//! Application workflows over the core engine and the store.
//!
//! The returns processor is the only path that writes to the return
//! log: it classifies a weigh-in, valuates units going back to stock
//! and persists the outcome. Batch ingestion, the 5S and DISC scoring
//! engines and the dashboard aggregation live alongside it.

pub mod batch;
pub mod disc;
pub mod error;
pub mod five_s;
pub mod returns;
pub mod stats;

pub use batch::{parse_batch, BatchRow};
pub use disc::{score_disc, DiscProfile, DiscReport, DiscSubmission};
pub use error::WorkflowError;
pub use five_s::{score_five_s, FiveSReport, FiveSSubmission, Pillar};
pub use returns::{CommitRequest, ReturnPreview, ReturnsProcessor};
pub use stats::{dashboard_stats, DashboardStats};
