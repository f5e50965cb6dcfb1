use wealth_crm::domain::client::{NewClient, UpdateClient};
use wealth_crm::domain::types::{ClientId, Objective, RiskLevel};
use wealth_crm::repository::errors::RepositoryError;
use wealth_crm::repository::synthetic::{SYNTHETIC_CLIENT_COUNT, synthetic_clients};
use wealth_crm::repository::{ClientReader, ClientStore, ClientWriter, MemoryClientStore};

mod common;

fn new_client(id: &str, first: &str, last: &str, account: &str) -> NewClient {
    let mut client = NewClient::new(ClientId::new(id).unwrap(), first, last);
    client.account_number = account.to_string();
    client.email = Some(format!("{}@example.com", first.to_lowercase()));
    client
}

fn id(value: &str) -> ClientId {
    ClientId::new(value).unwrap()
}

/// Behaviour shared by every store implementation.
fn check_store_contract(store: &dyn ClientStore) {
    assert_eq!(store.count_clients().unwrap(), 0);

    let jane = store
        .create_client(&new_client("c1", "Jane", "Doe", "AC-100001"))
        .unwrap();
    assert_eq!(jane.first_name, "Jane");
    assert_eq!(
        store
            .create_clients(&[
                new_client("c2", "John", "Smith", "AC-100002"),
                new_client("c3", "Ann", "Adams", "AC-100003"),
            ])
            .unwrap(),
        2
    );
    assert_eq!(store.count_clients().unwrap(), 3);

    let names: Vec<_> = store
        .list_clients()
        .unwrap()
        .into_iter()
        .map(|c| c.last_name)
        .collect();
    assert_eq!(names, vec!["Adams", "Doe", "Smith"]);

    let found = store.search_clients("do").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id("c1"));
    assert_eq!(store.search_clients("JOHN SMITH").unwrap().len(), 1);
    assert_eq!(store.search_clients("100003").unwrap()[0].first_name, "Ann");
    assert!(store.search_clients("zzz").unwrap().is_empty());

    let updates = UpdateClient {
        first_name: Some("Janet".to_string()),
        risk: Some(RiskLevel::High),
        objective: Some(Objective::Income),
        email: Some(String::new()),
        ..UpdateClient::default()
    };
    let updated = store.update_client(&id("c1"), &updates).unwrap().unwrap();
    assert_eq!(updated.first_name, "Janet");
    assert_eq!(updated.last_name, "Doe");
    assert_eq!(updated.risk, RiskLevel::High);
    assert_eq!(updated.objective, Objective::Income);
    assert!(updated.email.is_none());
    assert!(updated.updated_at >= updated.created_at);
    assert!(store.update_client(&id("c9"), &updates).unwrap().is_none());

    assert!(store.delete_client(&id("c2")).unwrap());
    assert!(!store.delete_client(&id("c2")).unwrap());
    assert!(store.get_client_by_id(&id("c2")).unwrap().is_none());

    let replaced = store
        .replace_all_clients(&[new_client("x1", "Zoe", "Young", "AC-9")])
        .unwrap();
    assert_eq!(replaced, 1);
    assert_eq!(store.count_clients().unwrap(), 1);
    assert!(store.get_client_by_id(&id("c1")).unwrap().is_none());

    store
        .replace_all_clients(&[
            new_client("s1", "Jane", "Doe", "AC-100001"),
            new_client("s2", "John", "Smith", "AC-100002"),
            new_client("s3", "Élodie", "Durand", "AC_100003"),
        ])
        .unwrap();
    let underscore = store.search_clients("_").unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].id, id("s3"));
    assert!(store.search_clients("%").unwrap().is_empty());
    assert!(store.search_clients("\\").unwrap().is_empty());
    assert_eq!(store.search_clients("ÉLODIE").unwrap().len(), 1);
    // Case folding is ASCII-only.
    assert!(store.search_clients("élodie").unwrap().is_empty());
}

#[test]
fn test_diesel_store_contract() {
    let test_db = common::TestDb::new("test_diesel_store_contract.db");
    check_store_contract(test_db.repo());
}

#[test]
fn test_memory_store_contract() {
    check_store_contract(&MemoryClientStore::new());
}

#[test]
fn test_duplicate_id_is_rejected() {
    let test_db = common::TestDb::new("test_duplicate_id_is_rejected.db");
    let repo = test_db.repo();
    repo.create_client(&new_client("c1", "Jane", "Doe", "AC-1"))
        .unwrap();

    let err = repo
        .create_client(&new_client("c1", "Jane", "Doe", "AC-1"))
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
}

#[test]
fn test_failed_replace_keeps_previous_clients() {
    let test_db = common::TestDb::new("test_failed_replace_keeps_previous_clients.db");
    let repo = test_db.repo();
    repo.create_client(&new_client("c1", "Jane", "Doe", "AC-1"))
        .unwrap();

    let duplicate = new_client("x1", "Zoe", "Young", "AC-9");
    assert!(
        repo.replace_all_clients(&[duplicate.clone(), duplicate])
            .is_err()
    );

    let remaining = repo.list_clients().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, id("c1"));
}

#[test]
fn test_synthetic_dataset_round_trips_through_sqlite() {
    let test_db = common::TestDb::new("test_synthetic_dataset_round_trips.db");
    let repo = test_db.repo();

    assert_eq!(
        repo.create_clients(&synthetic_clients()).unwrap(),
        SYNTHETIC_CLIENT_COUNT
    );

    let stored = repo.get_client_by_id(&id("c4")).unwrap().unwrap();
    let expected = &synthetic_clients()[4];
    assert_eq!(stored.first_name, expected.first_name);
    assert_eq!(stored.objective, expected.objective);
    assert_eq!(stored.risk, expected.risk);
    assert_eq!(stored.loss_pct, expected.loss_pct);
}
