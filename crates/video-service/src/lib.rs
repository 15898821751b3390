pub mod config;
mod error;
mod handlers;
mod routes;

use db::{DbConnection, PgDocumentStore, RecordStore};
use std::sync::Arc;
use tracing::{error, info, warn};
use video_pipeline::services::actions::ActionProvider;
use video_pipeline::services::jobs::JobService;
use video_pipeline::services::orchestrator::PipelineOrchestrator;

pub use config::ServiceConfig;
pub use routes::create_router;

/// Shared handler state. Every request sees the same store handle.
#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub jobs: Arc<JobService>,
    pub actions: Arc<dyn ActionProvider>,
    pub orchestrator: Arc<PipelineOrchestrator>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(store: RecordStore, actions: Arc<dyn ActionProvider>, config: ServiceConfig) -> Self {
        let orchestrator = PipelineOrchestrator::new(actions.clone(), store.clone())
            .with_action_timeout(config.action_timeout);

        Self {
            jobs: Arc::new(JobService::new(store.clone())),
            orchestrator: Arc::new(orchestrator),
            store,
            actions,
            config: Arc::new(config),
        }
    }
}

/// Opens the record store described by `config`.
///
/// A missing `DATABASE_URL` or a failed connection leaves the store
/// uninitialized instead of aborting startup.
pub async fn connect_store(config: &ServiceConfig) -> RecordStore {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL is not set, record store stays uninitialized");
        return RecordStore::uninitialized();
    };

    match DbConnection::new(database_url, config.database_name.as_deref()).await {
        Ok(connection) => {
            info!("Connected to record store");
            RecordStore::new(Arc::new(PgDocumentStore::new(connection)))
        }
        Err(e) => {
            error!("Record store unavailable, continuing without it: {}", e);
            RecordStore::uninitialized()
        }
    }
}
