//! # Client Repository
//!
//! Database operations for clients.
//!
//! The order-placement transaction only reads clients by id (inside its own
//! transaction); the write operations here are the independent registry
//! path. Deleting a client leaves its orders behind with `client_id` NULL
//! and the snapshot columns intact.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use venda_core::Client;

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Gets a client by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, establishment_type, phone, maps_link,
                   created_at, updated_at
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Inserts a new client.
    pub async fn insert(&self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, name = %client.name, "Inserting client");

        sqlx::query(
            r#"
            INSERT INTO clients (
                id, name, establishment_type, phone, maps_link,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.establishment_type)
        .bind(&client.phone)
        .bind(&client.maps_link)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing client.
    ///
    /// Orders placed before the update keep their client snapshot; this
    /// never rewrites history.
    pub async fn update(&self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, "Updating client");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE clients SET
                name = ?2,
                establishment_type = ?3,
                phone = ?4,
                maps_link = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.establishment_type)
        .bind(&client.phone)
        .bind(&client.maps_link)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", &client.id));
        }

        Ok(())
    }

    /// Deletes a client. Referencing orders survive with `client_id` NULL.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting client");

        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        Ok(())
    }
}

/// Helper to generate a new client ID.
pub fn generate_client_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
