//! Bulk replacement of the client store from a CSV export.

use crate::domain::client::NewClient;
use crate::files::DialogHost;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

pub const IMPORT_TITLE: &str = "Import Clients";

fn import_prompt(existing: usize, incoming: usize) -> String {
    format!(
        "This will replace all {existing} existing clients with {incoming} clients from the \
         file.\n\nDo you want to continue?"
    )
}

/// Replaces every stored client with `new_clients` once the user confirms.
/// Declining leaves the store untouched and yields [`ServiceError::Declined`].
pub fn import_clients<R>(
    repo: &R,
    dialog: &dyn DialogHost,
    new_clients: &[NewClient],
) -> ServiceResult<usize>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let existing = repo.count_clients()?;
    let prompt = import_prompt(existing, new_clients.len());

    if !dialog.confirm(IMPORT_TITLE, &prompt) {
        log::info!("Client import declined");
        return Err(ServiceError::Declined(prompt));
    }

    let imported = repo.replace_all_clients(new_clients).map_err(|err| {
        log::error!("Failed to import clients: {err}");
        err
    })?;
    log::info!("Imported {imported} clients, replacing {existing}");
    Ok(imported)
}
