use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autoprofi_backend::config::AppConfig;
use autoprofi_backend::lists::ListCache;
use autoprofi_backend::routes::router;
use autoprofi_backend::session::SessionGate;
use autoprofi_backend::state::AppState;
use autoprofi_backend::store::HttpRecordStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "autoprofi_backend=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let store = Arc::new(HttpRecordStore::new(config.records_api_url.clone())?);
    let state = AppState {
        store,
        gate: Arc::new(SessionGate::new(config.admin_password.clone())),
        lists: Arc::new(ListCache::new()),
    };

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
