//! # Application State
//!
//! Owns the database handle and the two domain components built on it.
//!
//! The `Database` pool is thread-safe, and `Catalog` and `RentalLedger`
//! share it through one `Arc<dyn PersistenceGateway>`.

use std::sync::Arc;
use tracing::info;

use fleet_core::{Catalog, RentalLedger, SharedGateway};
use fleet_db::{Database, DbConfig, DbResult};

/// Wired-up components for one command run.
#[derive(Clone)]
pub struct AppState {
    db: Database,
    catalog: Catalog,
    ledger: RentalLedger,
}

impl AppState {
    /// Connects to the database (running migrations) and builds the
    /// components on top of it.
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        let db = Database::new(config).await?;
        info!("Database connected and migrations applied");
        Ok(Self::from_database(db))
    }

    /// Builds the components over an already-open database.
    pub fn from_database(db: Database) -> Self {
        let gateway: SharedGateway = Arc::new(db.clone());
        let catalog = Catalog::new(gateway.clone());
        let ledger = RentalLedger::new(gateway, catalog.clone());

        AppState {
            db,
            catalog,
            ledger,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &RentalLedger {
        &self.ledger
    }

    /// Returns `(total_migrations, applied_migrations)` for the open database.
    pub async fn migration_status(&self) -> DbResult<(usize, usize)> {
        self.db.migration_status().await
    }

    /// Closes the connection pool.
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}
