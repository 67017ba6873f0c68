//! # Client Repository
//!
//! Database operations for the `clients` table.
//!
//! `clients.email` carries a UNIQUE constraint. A second insert with an
//! existing email fails with `DbError::UniqueViolation` naming the email,
//! and the first client's row is left as it was.

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use fleet_core::{Client, ClientId, NewClient};

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

    /// Inserts a client and returns it with the id SQLite assigned.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - The email is already registered
    pub async fn insert(&self, client: &NewClient) -> DbResult<Client> {
        debug!(email = %client.email, "Inserting client");

        let result = sqlx::query(
            r#"
            INSERT INTO clients (full_name, email)
            VALUES (?, ?)
            "#,
        )
        .bind(&client.full_name)
        .bind(&client.email)
        .execute(&self.pool)
        .await
        .map_err(DbError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                warn!(email = %client.email, "Email already registered");
                DbError::duplicate("email", client.email.clone())
            } else {
                e
            }
        })?;

        Ok(Client {
            id: ClientId::new(result.last_insert_rowid()),
            full_name: client.full_name.clone(),
            email: client.email.clone(),
        })
    }

    /// Gets a client by id.
    pub async fn get_by_id(&self, id: ClientId) -> DbResult<Option<Client>> {
        debug!(client_id = %id, "Getting client by ID");

        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, full_name, email
            FROM clients
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Lists every client ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, full_name, email
            FROM clients
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = clients.len(), "Listed clients");
        Ok(clients)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn new_client(name: &str, email: &str) -> NewClient {
        NewClient {
            full_name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let ana = db
            .clients()
            .insert(&new_client("Ana", "ana@x.com"))
            .await
            .unwrap();
        let err = db
            .clients()
            .insert(&new_client("Other Ana", "ana@x.com"))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "email");
                assert_eq!(value, "ana@x.com");
            }
            other => panic!("unexpected {other:?}"),
        }

        // First registration untouched
        let stored = db.clients().get_by_id(ana.id).await.unwrap().unwrap();
        assert_eq!(stored.full_name, "Ana");
        assert_eq!(db.clients().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_uniqueness_is_case_sensitive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.clients()
            .insert(&new_client("Ana", "ana@x.com"))
            .await
            .unwrap();
        assert!(db
            .clients()
            .insert(&new_client("Ana", "ANA@x.com"))
            .await
            .is_ok());
    }
}
