use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::AppState;
use crate::handlers::{actions, health, jobs, run};

pub fn create_router(state: AppState) -> Router {
    info!("Setting up HTTP router");

    Router::new()
        .route("/", get(health::root))
        .route("/api/hello", get(health::hello))
        .route("/test", get(health::test_database))
        .route("/api/jobs", post(jobs::create_job).get(jobs::list_jobs))
        .route(
            "/api/actions/generate_voice",
            post(actions::generate_voice),
        )
        .route(
            "/api/actions/generate_broll",
            post(actions::generate_broll),
        )
        .route(
            "/api/actions/auto_edit_video",
            post(actions::auto_edit_video),
        )
        .route("/api/run", post(run::run_pipeline))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::test_support::server_with_store;
    use axum::http::StatusCode;
    use db::RecordStore;

    #[tokio::test]
    async fn test_create_router_serves_root() {
        let server = server_with_store(RecordStore::uninitialized());

        let response = server.get("/").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let server = server_with_store(RecordStore::uninitialized());

        let response = server.get("/api/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
