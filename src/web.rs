mod handlers;
mod routes;


use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::service::BlogService;

pub struct AppState {
    pub blog: BlogService,
}

impl AppState {
    pub fn new(blog: BlogService) -> Arc<Self> {
        Arc::new(Self { blog })
    }
}

/// The JSON API plus the browser client served from `static_dir`.
pub fn router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(addr: String, state: Arc<AppState>, static_dir: String) -> crate::Result<()> {
    let app = router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::Error::Internal(e.to_string()))?;

    Ok(())
}
