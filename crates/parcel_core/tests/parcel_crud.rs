use parcel_core::db::open_db_in_memory;
use parcel_core::{
    now_rfc3339, ClientId, Parcel, ParcelRepository, ParcelStatus, RepoError,
    SqliteParcelRepository,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn test_parcel() -> Parcel {
    Parcel {
        number: 0,
        client: 1000,
        status: ParcelStatus::Registered,
        address: "test".to_string(),
        created_at: now_rfc3339(),
    }
}

fn random_client(rng: &mut impl Rng) -> ClientId {
    rng.gen_range(0..10_000_000)
}

#[test]
fn add_get_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();
    let parcel = test_parcel();

    let id = store.add(&parcel).unwrap();
    assert!(id > 0);

    let stored = store.get(id).unwrap();
    assert_eq!(stored.number, id);
    assert_eq!(stored.client, parcel.client);
    assert_eq!(stored.address, parcel.address);
    assert_eq!(stored.status, parcel.status);
    assert_eq!(stored.created_at, parcel.created_at);

    store.delete(id).unwrap();

    let err = store.get(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(number) if number == id));
    assert!(err.is_not_found());
}

#[test]
fn add_ignores_caller_supplied_number() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();

    let mut parcel = test_parcel();
    parcel.number = 777;
    let first = store.add(&parcel).unwrap();
    let second = store.add(&parcel).unwrap();

    assert_ne!(first, second);
    assert_eq!(store.get(first).unwrap().number, first);
    assert_eq!(store.get(second).unwrap().number, second);
}

#[test]
fn set_address_updates_registered_parcel() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();
    let parcel = test_parcel();

    let id = store.add(&parcel).unwrap();
    let new_address = "new test address";
    store.set_address(id, new_address).unwrap();

    let stored = store.get(id).unwrap();
    assert_eq!(stored.address, new_address);
    assert_eq!(stored.client, parcel.client);
    assert_eq!(stored.status, ParcelStatus::Registered);
    assert_eq!(stored.created_at, parcel.created_at);
}

#[test]
fn set_status_updates_only_status() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();
    let parcel = test_parcel();

    let id = store.add(&parcel).unwrap();
    store.set_status(id, ParcelStatus::Sent).unwrap();

    let stored = store.get(id).unwrap();
    assert_eq!(stored.status, ParcelStatus::Sent);
    assert_eq!(stored.client, parcel.client);
    assert_eq!(stored.address, parcel.address);
    assert_eq!(stored.created_at, parcel.created_at);
}

#[test]
fn set_status_allows_any_transition() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();
    let id = store.add(&test_parcel()).unwrap();

    for status in [
        ParcelStatus::Delivered,
        ParcelStatus::Sent,
        ParcelStatus::Registered,
    ] {
        store.set_status(id, status).unwrap();
        assert_eq!(store.get(id).unwrap().status, status);
    }
}

#[test]
fn get_by_client_returns_only_that_clients_parcels() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();
    let mut rng = StdRng::seed_from_u64(4242424);

    let client = random_client(&mut rng);
    let mut parcels = vec![test_parcel(), test_parcel(), test_parcel()];
    let mut added = HashMap::new();
    for parcel in &mut parcels {
        parcel.client = client;
        parcel.number = store.add(parcel).unwrap();
        added.insert(parcel.number, parcel.clone());
    }

    let mut other = test_parcel();
    other.client = client + 1;
    store.add(&other).unwrap();

    let stored = store.get_by_client(client).unwrap();
    assert_eq!(stored.len(), parcels.len());
    for parcel in &stored {
        let expected = added.get(&parcel.number).unwrap();
        assert_eq!(parcel, expected);
    }
}

#[test]
fn get_by_client_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();

    let client = 4242424;
    let mut numbers = Vec::new();
    for address in ["first", "second", "third"] {
        let mut parcel = test_parcel();
        parcel.client = client;
        parcel.address = address.to_string();
        numbers.push(store.add(&parcel).unwrap());
    }

    let stored = store.get_by_client(client).unwrap();
    let addresses: Vec<_> = stored.iter().map(|p| p.address.as_str()).collect();
    let stored_numbers: Vec<_> = stored.iter().map(|p| p.number).collect();
    assert_eq!(addresses, ["first", "second", "third"]);
    assert_eq!(stored_numbers, numbers);
}

#[test]
fn get_by_client_without_parcels_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();
    store.add(&test_parcel()).unwrap();

    assert!(store.get_by_client(1).unwrap().is_empty());
}

#[test]
fn add_rejects_invalid_parcels_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();

    let mut blank = test_parcel();
    blank.address = " ".to_string();
    assert!(matches!(
        store.add(&blank).unwrap_err(),
        RepoError::Validation(_)
    ));

    let mut bad_time = test_parcel();
    bad_time.created_at = "2024-13-45".to_string();
    assert!(matches!(
        store.add(&bad_time).unwrap_err(),
        RepoError::Validation(_)
    ));

    assert!(store.get_by_client(1000).unwrap().is_empty());
}

#[test]
fn get_rejects_unknown_persisted_status() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();
    let id = store.add(&test_parcel()).unwrap();

    conn.execute("UPDATE parcel SET status = 'lost' WHERE number = ?1;", [id])
        .unwrap();

    assert!(matches!(
        store.get(id).unwrap_err(),
        RepoError::InvalidData(message) if message.contains("lost")
    ));
}

#[test]
fn storage_failures_are_not_reported_as_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelRepository::try_new(&conn).unwrap();
    let id = store.add(&test_parcel()).unwrap();

    conn.execute_batch("DROP TABLE parcel;").unwrap();

    let get_err = store.get(id).unwrap_err();
    assert!(matches!(get_err, RepoError::Db(_)));
    assert!(!get_err.is_not_found());

    let list_err = store.get_by_client(1000).unwrap_err();
    assert!(matches!(list_err, RepoError::Db(_)));
    assert!(!list_err.is_not_found());

    let delete_err = store.delete(id).unwrap_err();
    assert!(matches!(delete_err, RepoError::Db(_)));

    let add_err = store.add(&test_parcel()).unwrap_err();
    assert!(matches!(add_err, RepoError::Db(_)));
}
