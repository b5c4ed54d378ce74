use std::env;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tonerqc_server::{build_router, AppState};
use tonerqc_store::Store;

#[tokio::main]
async fn main() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Store::seeded()
        .await
        .map_err(|err| format!("seeding store: {err}"))?;
    let app = build_router(AppState::new(store));

    let bind_addr = env::var("TONERQC_BIND").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| format!("binding {bind_addr}: {err}"))?;
    info!(%bind_addr, "listening");
    axum::serve(listener, app)
        .await
        .map_err(|err| err.to_string())
}
