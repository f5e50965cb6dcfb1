//! Client record browsing and editing.

use std::sync::Arc;

use crate::domain::client::{Client, ClientList, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::forms::client::{AddClientForm, SaveClientForm};
use crate::models::config::{Platform, ServerConfig};
use crate::repository::synthetic::synthetic_clients;
use crate::repository::{ClientReader, ClientStore, ClientWriter, DieselRepository, MemoryClientStore};
use crate::services::{ServiceError, ServiceResult};

/// Selects the client store for the configured platform.
///
/// The desktop store is SQLite; when it cannot be opened the synthetic
/// dataset is served from memory instead. The web platform always uses the
/// in-memory store.
pub fn open_client_store(config: &ServerConfig) -> Arc<dyn ClientStore> {
    if config.platform == Platform::Web {
        log::info!("Web platform: serving synthetic clients from memory");
        return Arc::new(MemoryClientStore::with_synthetic_data());
    }

    match DieselRepository::open(&config.database_url) {
        Ok(repo) => {
            if config.seed_demo_data {
                if let Err(err) = seed_demo_clients(&repo) {
                    log::error!("Failed to seed demo clients: {err}");
                }
            }
            Arc::new(repo)
        }
        Err(err) => {
            log::error!("Failed to open client store, using synthetic data: {err}");
            Arc::new(MemoryClientStore::with_synthetic_data())
        }
    }
}

/// Inserts the synthetic dataset when the store holds no clients. Returns
/// the number of inserted records.
pub fn seed_demo_clients<R>(repo: &R) -> ServiceResult<usize>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    if repo.count_clients()? > 0 {
        return Ok(0);
    }

    let inserted = repo.create_clients(&synthetic_clients()).map_err(|err| {
        log::error!("Failed to insert demo clients: {err}");
        err
    })?;
    log::info!("Seeded {inserted} demo clients");
    Ok(inserted)
}

fn parse_id(id: &str) -> ServiceResult<ClientId> {
    Ok(ClientId::new(id.trim())?)
}

/// Lists every client, or those matching `search` when it is not blank.
pub fn list_clients<R>(repo: &R, search: Option<&str>) -> ServiceResult<ClientList>
where
    R: ClientReader + ?Sized,
{
    let clients = match search.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => repo.search_clients(query),
        None => repo.list_clients(),
    }
    .map_err(|err| {
        log::error!("Failed to list clients: {err}");
        err
    })?;

    Ok(ClientList::from(clients))
}

pub fn get_client<R>(repo: &R, id: &str) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    let id = parse_id(id)?;
    repo.get_client_by_id(&id)?.ok_or(ServiceError::NotFound)
}

/// Validates the form and persists a new client.
pub fn create_client<R>(repo: &R, form: AddClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let new_client = NewClient::try_from(form)?;

    repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to create client: {err}");
        ServiceError::from(err)
    })
}

/// Applies a partial update and returns the stored record.
pub fn update_client<R>(repo: &R, id: &str, form: SaveClientForm) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let id = parse_id(id)?;
    let updates = UpdateClient::try_from(form)?;

    if updates.is_empty() {
        return repo.get_client_by_id(&id)?.ok_or(ServiceError::NotFound);
    }

    repo.update_client(&id, &updates)
        .map_err(|err| {
            log::error!("Failed to update client {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

pub fn delete_client<R>(repo: &R, id: &str) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    let id = parse_id(id)?;

    let removed = repo.delete_client(&id).map_err(|err| {
        log::error!("Failed to delete client {id}: {err}");
        err
    })?;

    if removed {
        log::info!("Deleted client {id}");
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}
