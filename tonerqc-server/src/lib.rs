//! HTTP API over the store and workflows.
//!
//! One axum router; application state is built in `main` and injected
//! through `State`. Every handler returns `Result<_, ApiError>` and the
//! error type owns the status-code mapping.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
