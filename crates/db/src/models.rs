use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Error, PgPool, types::Json};
use std::sync::Arc;
use uuid::Uuid;

use crate::DbConnection;

const CREATE_DOCUMENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        id TEXT PRIMARY KEY,
        collection TEXT NOT NULL,
        body JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_COLLECTION_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_documents_collection_created
    ON documents (collection, created_at DESC)
"#;

#[derive(sqlx::FromRow, Debug)]
pub struct DocumentRow {
    pub id: String,
    pub collection: String,
    pub body: Json<Value>,
    pub created_at: DateTime<Utc>,
}

pub async fn ensure_documents_table(pool: &PgPool) -> Result<(), Error> {
    sqlx::query(CREATE_DOCUMENTS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_COLLECTION_INDEX).execute(pool).await?;
    Ok(())
}

pub async fn insert_document(
    db: Arc<DbConnection>,
    collection: &str,
    body: &Value,
) -> Result<String, Error> {
    let id = Uuid::new_v4().to_string();
    tracing::debug!("Inserting document {} into collection {}", id, collection);

    sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
        .bind(&id)
        .bind(collection)
        .bind(Json(body))
        .execute(&db.pool)
        .await?;

    Ok(id)
}

// Newest first. Ties on created_at fall back to id so the order is stable.
pub async fn get_documents(
    db: Arc<DbConnection>,
    collection: &str,
    limit: i64,
) -> Result<Vec<DocumentRow>, Error> {
    tracing::debug!(
        "Getting up to {} documents from collection {}",
        limit,
        collection
    );

    let rows = sqlx::query_as(
        r#"
        SELECT id, collection, body, created_at
        FROM documents
        WHERE collection = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2
        "#,
    )
    .bind(collection)
    .bind(limit)
    .fetch_all(&db.pool)
    .await?;

    Ok(rows)
}

pub async fn get_collection_names(db: Arc<DbConnection>, limit: i64) -> Result<Vec<String>, Error> {
    sqlx::query_scalar(
        r#"
        SELECT DISTINCT collection
        FROM documents
        ORDER BY collection ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(&db.pool)
    .await
}
