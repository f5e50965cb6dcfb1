//! Mock store for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: &ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn search_clients(&self, query: &str) -> RepositoryResult<Vec<Client>>;
        fn count_clients(&self) -> RepositoryResult<usize>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
        fn update_client(
            &self,
            id: &ClientId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Option<Client>>;
        fn delete_client(&self, id: &ClientId) -> RepositoryResult<bool>;
        fn replace_all_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
    }
}
