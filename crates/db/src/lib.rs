use eyre::{Result, eyre};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};
use std::str::FromStr;
use std::sync::Arc;

pub mod error;
pub mod models;
pub mod store;

pub use error::StoreError;
pub use store::{DocumentStore, PgDocumentStore, RecordStore, StoreDiagnostics, StoredDocument};

pub struct DbConnection {
    pub pool: Pool<Postgres>,
}

// Use Arc to allow thread-safe cloning
impl DbConnection {
    /// Connects to Postgres and makes sure the documents table exists.
    ///
    /// `database_name`, when given, replaces whatever database the url points at.
    pub async fn new(database_url: &str, database_name: Option<&str>) -> Result<Arc<Self>> {
        let mut options = PgConnectOptions::from_str(database_url)
            .map_err(|e| eyre!("Invalid database url: {}", e))?;
        if let Some(name) = database_name {
            options = options.database(name);
        }

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| eyre!("Failed to connect to database: {}", e))?;

        models::ensure_documents_table(&pool)
            .await
            .map_err(|e| eyre!("Failed to prepare documents table: {}", e))?;

        Ok(Arc::new(Self { pool }))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
