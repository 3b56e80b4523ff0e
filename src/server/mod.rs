pub mod api;
pub mod state;

pub use state::{AppState, StoredSpec};

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the API router over `state`
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/captures/convert", post(api::convert_capture))
        .route(
            "/api/captures/project/{project_id}",
            get(api::list_project_captures),
        )
        .route(
            "/api/captures/{id}",
            get(api::get_capture).delete(api::delete_capture),
        )
        .route("/api/specs/generate", post(api::generate_spec))
        .route(
            "/api/specs/project/{project_id}",
            get(api::get_project_spec),
        )
        .route("/api/specs/validate", post(api::validate_spec_content))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP API
pub async fn start_server(addr: SocketAddr, state: AppState) -> crate::Result<()> {
    let app = app(state);

    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
