//! In-memory client store used when no SQLite database is reachable.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::synthetic::synthetic_clients;
use crate::repository::{ClientReader, ClientWriter};

/// Vector-backed store with the same ordering and search rules as the SQLite one.
#[derive(Debug, Default)]
pub struct MemoryClientStore {
    clients: RwLock<Vec<Client>>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the deterministic demo dataset.
    pub fn with_synthetic_data() -> Self {
        let now = Utc::now().naive_utc();
        let clients = synthetic_clients()
            .into_iter()
            .map(|c| c.into_client(now))
            .collect();
        Self {
            clients: RwLock::new(clients),
        }
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, Vec<Client>>> {
        self.clients
            .read()
            .map_err(|_| RepositoryError::Unexpected("client store lock poisoned".to_string()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, Vec<Client>>> {
        self.clients
            .write()
            .map_err(|_| RepositoryError::Unexpected("client store lock poisoned".to_string()))
    }
}

fn sorted(mut clients: Vec<Client>) -> Vec<Client> {
    clients.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });
    clients
}

fn insert(clients: &mut Vec<Client>, new_client: &NewClient) -> RepositoryResult<Client> {
    if clients.iter().any(|c| c.id == new_client.id) {
        return Err(RepositoryError::ConstraintViolation(format!(
            "Unique constraint violation: client {} already exists",
            new_client.id
        )));
    }
    let client = new_client.clone().into_client(Utc::now().naive_utc());
    clients.push(client.clone());
    Ok(client)
}

impl ClientReader for MemoryClientStore {
    fn get_client_by_id(&self, id: &ClientId) -> RepositoryResult<Option<Client>> {
        Ok(self.read()?.iter().find(|c| &c.id == id).cloned())
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        Ok(sorted(self.read()?.clone()))
    }

    fn search_clients(&self, query: &str) -> RepositoryResult<Vec<Client>> {
        let needle = query.trim();
        let matches = self
            .read()?
            .iter()
            .filter(|c| c.matches(needle))
            .cloned()
            .collect();
        Ok(sorted(matches))
    }

    fn count_clients(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.len())
    }
}

impl ClientWriter for MemoryClientStore {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        insert(&mut *self.write()?, new_client)
    }

    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        let mut clients = self.write()?;
        let mut staged = clients.clone();
        for new_client in new_clients {
            insert(&mut staged, new_client)?;
        }
        *clients = staged;
        Ok(new_clients.len())
    }

    fn update_client(
        &self,
        id: &ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Option<Client>> {
        let mut clients = self.write()?;
        Ok(clients.iter_mut().find(|c| &c.id == id).map(|client| {
            updates.apply_to(client, Utc::now().naive_utc());
            client.clone()
        }))
    }

    fn delete_client(&self, id: &ClientId) -> RepositoryResult<bool> {
        let mut clients = self.write()?;
        let before = clients.len();
        clients.retain(|c| &c.id != id);
        Ok(clients.len() < before)
    }

    fn replace_all_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        let mut staged = Vec::with_capacity(new_clients.len());
        for new_client in new_clients {
            insert(&mut staged, new_client)?;
        }
        *self.write()? = staged;
        Ok(new_clients.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client(id: &str, first: &str, last: &str) -> NewClient {
        NewClient::new(ClientId::new(id).unwrap(), first, last)
    }

    #[test]
    fn search_matches_substring_case_insensitively() {
        let store = MemoryClientStore::new();
        store
            .create_clients(&[
                new_client("c1", "Jane", "Doe"),
                new_client("c2", "John", "Smith"),
            ])
            .unwrap();

        let found = store.search_clients("do").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].last_name, "Doe");
        assert_eq!(store.search_clients("JOHN SM").unwrap().len(), 1);
    }

    #[test]
    fn list_orders_by_last_then_first_name() {
        let store = MemoryClientStore::new();
        store
            .create_clients(&[
                new_client("c1", "Zed", "Brown"),
                new_client("c2", "Amy", "Brown"),
                new_client("c3", "Bob", "Adams"),
            ])
            .unwrap();

        let names: Vec<_> = store
            .list_clients()
            .unwrap()
            .iter()
            .map(|c| c.full_name())
            .collect();
        assert_eq!(names, vec!["Bob Adams", "Amy Brown", "Zed Brown"]);
    }

    #[test]
    fn duplicate_ids_are_rejected_without_partial_writes() {
        let store = MemoryClientStore::new();
        store.create_client(&new_client("c1", "Jane", "Doe")).unwrap();

        let result = store.replace_all_clients(&[
            new_client("c2", "A", "B"),
            new_client("c2", "C", "D"),
        ]);

        assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
        assert_eq!(store.count_clients().unwrap(), 1);
    }

    #[test]
    fn update_and_delete_report_missing_records() {
        let store = MemoryClientStore::new();
        let missing = ClientId::new("nope").unwrap();
        assert!(
            store
                .update_client(&missing, &UpdateClient::default())
                .unwrap()
                .is_none()
        );
        assert!(!store.delete_client(&missing).unwrap());
    }

    #[test]
    fn synthetic_store_is_prefilled() {
        let store = MemoryClientStore::with_synthetic_data();
        assert_eq!(store.count_clients().unwrap(), 100);
    }
}
