//! Client store traits and their implementations.
//!
//! Services depend on [`ClientReader`]/[`ClientWriter`] only, so the SQLite
//! store and the in-memory fallback are interchangeable behind
//! `Arc<dyn ClientStore>`.

use crate::db::{DbConnection, DbPool, establish_connection_pool, get_connection, run_migrations};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod synthetic;

pub use memory::MemoryClientStore;

pub trait ClientReader {
    fn get_client_by_id(&self, id: &ClientId) -> RepositoryResult<Option<Client>>;
    /// All records ordered by last name, then first name.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    /// Case-insensitive substring match over names and account number.
    fn search_clients(&self, query: &str) -> RepositoryResult<Vec<Client>>;
    fn count_clients(&self) -> RepositoryResult<usize>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
    /// Returns `None` when no record has the given id.
    fn update_client(
        &self,
        id: &ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Option<Client>>;
    /// Returns whether a record was removed.
    fn delete_client(&self, id: &ClientId) -> RepositoryResult<bool>;
    /// Deletes every record and inserts `new_clients` atomically.
    fn replace_all_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
}

/// Object-safe union of the store traits shared between request handlers.
pub trait ClientStore: ClientReader + ClientWriter + Send + Sync {}

impl<T> ClientStore for T where T: ClientReader + ClientWriter + Send + Sync + ?Sized {}

/// Diesel-backed store over a pooled SQLite database.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Builds the pool for `database_url` and applies pending migrations.
    pub fn open(database_url: &str) -> RepositoryResult<Self> {
        let pool = establish_connection_pool(database_url)?;
        run_migrations(&pool)?;
        log::info!("Opened client store at {database_url}");
        Ok(Self::new(pool))
    }

    /// Drops this handle's pool. Connections close once every clone of the
    /// store has been closed or dropped.
    pub fn close(self) {
        log::info!(
            "Closing client store ({} idle connections)",
            self.pool.state().idle_connections
        );
        drop(self.pool);
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
