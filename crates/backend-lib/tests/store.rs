// crates/backend-lib/tests/store.rs
use backend_lib::error::{AppError, ConflictField};
use backend_lib::store::{CredentialStore, FlatFileStore, NewAccount};
use gatekeeper_common::Role;
use std::sync::Arc;

fn new_account(username: &str, email: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$scrypt$ln=6,r=8,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        role: Role::User,
    }
}

#[tokio::test]
async fn test_insert_and_find() {
    let dir = tempfile::tempdir().unwrap();
    let store = FlatFileStore::open(dir.path()).unwrap();

    let account = store
        .insert(new_account("alice1", "a@x.com"))
        .await
        .unwrap();
    assert_eq!(account.username, "alice1");
    assert_eq!(account.role, Role::User);

    let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.id, account.id);

    let found = store.find_by_username("alice1").await.unwrap().unwrap();
    assert_eq!(found.id, account.id);

    assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
    assert!(store.find_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let store = FlatFileStore::open(dir.path()).unwrap();

    store
        .insert(new_account("alice1", "a@x.com"))
        .await
        .unwrap();

    let err = store
        .insert(new_account("alice2", "a@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(ConflictField::Email)));

    let err = store
        .insert(new_account("alice1", "b@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(ConflictField::Username)));
}

#[tokio::test]
async fn test_concurrent_inserts_have_exactly_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FlatFileStore::open(dir.path()).unwrap());

    // Two racing registrations on the same email: one success, one
    // conflict, never two successes.
    let first = tokio::spawn({
        let store = store.clone();
        async move { store.insert(new_account("alice1", "a@x.com")).await }
    });
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.insert(new_account("alice2", "a@x.com")).await }
    });

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    let successes = first.is_ok() as usize + second.is_ok() as usize;
    assert_eq!(successes, 1);

    let loser = if first.is_ok() { second } else { first };
    assert!(matches!(
        loser.unwrap_err(),
        AppError::Conflict(ConflictField::Email)
    ));

    // Only the winner reached disk
    assert!(store.find_by_email("a@x.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_reopen_preserves_accounts() {
    let dir = tempfile::tempdir().unwrap();

    let inserted = {
        let store = FlatFileStore::open(dir.path()).unwrap();
        store
            .insert(new_account("alice1", "a@x.com"))
            .await
            .unwrap()
    };

    // A fresh store over the same directory rebuilds the index from disk.
    let store = FlatFileStore::open(dir.path()).unwrap();
    let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(found.id, inserted.id);
    assert_eq!(found.password_hash, inserted.password_hash);

    // And still enforces uniqueness against the reloaded records
    let err = store
        .insert(new_account("alice1", "c@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(ConflictField::Username)));
}
