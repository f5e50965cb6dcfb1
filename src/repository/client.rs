use chrono::Utc;
use diesel::prelude::*;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository};
use crate::schema::clients;

/// `%query%` with `LIKE` wildcards in `query` taken literally.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn into_domain(rows: Vec<DbClient>) -> RepositoryResult<Vec<Client>> {
    rows.into_iter()
        .map(|row| Client::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: &ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.as_str())
            .first::<DbClient>(&mut conn)
            .optional()?;

        client
            .map(Client::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        let mut conn = self.conn()?;
        let rows = clients::table
            .order((clients::last_name.asc(), clients::first_name.asc()))
            .load::<DbClient>(&mut conn)?;

        into_domain(rows)
    }

    fn search_clients(&self, query: &str) -> RepositoryResult<Vec<Client>> {
        let mut conn = self.conn()?;
        // SQLite LIKE is case-insensitive for ASCII only.
        let pattern = like_pattern(query.trim());

        let rows = clients::table
            .filter(
                clients::first_name
                    .like(&pattern)
                    .escape('\\')
                    .or(clients::last_name.like(&pattern).escape('\\'))
                    .or(clients::first_name
                        .concat(" ")
                        .concat(clients::last_name)
                        .like(&pattern)
                        .escape('\\'))
                    .or(clients::account_number.like(&pattern).escape('\\')),
            )
            .order((clients::last_name.asc(), clients::first_name.asc()))
            .load::<DbClient>(&mut conn)?;

        into_domain(rows)
    }

    fn count_clients(&self) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total: i64 = clients::table.count().get_result(&mut conn)?;
        Ok(total as usize)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        let insertable = DbNewClient::from(new_client);

        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(created)?)
    }

    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let mut inserted = 0;
            for new_client in new_clients {
                inserted += diesel::insert_into(clients::table)
                    .values(&DbNewClient::from(new_client))
                    .execute(conn)?;
            }
            Ok(inserted)
        })
    }

    fn update_client(
        &self,
        id: &ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        let changes = DbUpdateClient::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(clients::table.find(id.as_str()))
            .set(&changes)
            .get_result::<DbClient>(&mut conn)
            .optional()?;

        updated
            .map(Client::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn delete_client(&self, id: &ClientId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(clients::table.find(id.as_str())).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn replace_all_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let removed = diesel::delete(clients::table).execute(conn)?;
            log::info!("Replacing {removed} clients with {}", new_clients.len());

            let mut inserted = 0;
            for new_client in new_clients {
                inserted += diesel::insert_into(clients::table)
                    .values(&DbNewClient::from(new_client))
                    .execute(conn)?;
            }
            Ok(inserted)
        })
    }
}
