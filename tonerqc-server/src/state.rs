//! Application state.

use std::sync::Arc;

use tonerqc_store::Store;
use tonerqc_workflow::ReturnsProcessor;

/// Everything the handlers need, cloned per request. Construction is
/// explicit: the binary (or a test) builds the store, seeds it if it
/// wants the defaults, and hands it over here.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub processor: Arc<ReturnsProcessor>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        let processor = Arc::new(ReturnsProcessor::new(
            store.toners.clone(),
            store.returns.clone(),
        ));
        AppState { store, processor }
    }
}
