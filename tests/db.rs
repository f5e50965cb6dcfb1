use wealth_crm::db::run_migrations;
use wealth_crm::domain::client::NewClient;
use wealth_crm::domain::types::ClientId;
use wealth_crm::repository::{ClientReader, ClientWriter, DieselRepository};

mod common;

#[test]
fn test_creates_and_migrates_db_file() {
    let test_db = common::TestDb::new("test_creates_and_migrates_db_file.db");
    assert!(test_db.pool().get().is_ok());
    assert!(test_db.path().exists());
    assert_eq!(test_db.repo().count_clients().unwrap(), 0);
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_migrations_are_idempotent.db");
    run_migrations(test_db.pool()).unwrap();
    assert_eq!(test_db.repo().count_clients().unwrap(), 0);
}

#[test]
fn test_closed_store_reopens_with_its_data() {
    let test_db = common::TestDb::new("test_closed_store_reopens_with_its_data.db");
    let url = test_db.path().to_str().unwrap().to_string();

    let store = DieselRepository::open(&url).unwrap();
    store
        .create_client(&NewClient::new(ClientId::new("c1").unwrap(), "Jane", "Doe"))
        .unwrap();
    store.close();

    let reopened = DieselRepository::open(&url).unwrap();
    assert_eq!(reopened.count_clients().unwrap(), 1);
    reopened.close();
}
