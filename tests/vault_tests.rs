//! Integration tests for the Passvault account and vault modules.

use std::fs;

use passvault::auth::{CredentialStore, Session};
use passvault::crypto::{Kdf, SecretCipher};
use passvault::errors::PassvaultError;
use passvault::vault::VaultStore;
use tempfile::TempDir;

/// Cheap KDF so the suite stays fast; behaviour is identical.
fn fast_cipher() -> SecretCipher {
    SecretCipher::new(Kdf::with_iterations(1_000).unwrap())
}

/// Helper: a temp dir with a registered user, their session, and an open vault.
fn setup(username: &str) -> (TempDir, Session, VaultStore) {
    let dir = TempDir::new().expect("create temp dir");
    let mut users = CredentialStore::open(&dir.path().join("users.json")).unwrap();
    users.register(username, "correct horse").unwrap();
    let session = users.authenticate(username, "correct horse").unwrap();
    let vault = VaultStore::open(&dir.path().join("data.json"), fast_cipher()).unwrap();
    (dir, session, vault)
}

fn login(dir: &TempDir, username: &str, password: &str) -> Session {
    CredentialStore::open(&dir.path().join("users.json"))
        .unwrap()
        .authenticate(username, password)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Store and retrieve
// ---------------------------------------------------------------------------

#[test]
fn note_example_with_default_kdf() {
    let dir = TempDir::new().unwrap();
    let mut users = CredentialStore::open(&dir.path().join("users.json")).unwrap();
    users.register("sam", "pw").unwrap();
    let session = users.authenticate("sam", "pw").unwrap();
    let mut vault =
        VaultStore::open(&dir.path().join("data.json"), SecretCipher::default()).unwrap();

    vault.store(&session, "note", "hello world", "p@ss").unwrap();

    assert_eq!(vault.retrieve(&session, "note", "p@ss").unwrap(), "hello world");
    assert!(matches!(
        vault.retrieve(&session, "note", "wrong"),
        Err(PassvaultError::IncorrectPasskey)
    ));
}

#[test]
fn store_and_reopen_from_disk() {
    let (dir, session, mut vault) = setup("alice");
    vault.store(&session, "bank", "PIN 4321", "blue").unwrap();
    vault.store(&session, "wifi", "hunter2hunter2", "green").unwrap();
    drop(vault);

    let session = login(&dir, "alice", "correct horse");
    let vault = VaultStore::open(&dir.path().join("data.json"), fast_cipher()).unwrap();
    assert_eq!(vault.retrieve(&session, "bank", "blue").unwrap(), "PIN 4321");
    assert_eq!(
        vault.retrieve(&session, "wifi", "green").unwrap(),
        "hunter2hunter2"
    );
}

#[test]
fn missing_title_is_no_such_entry() {
    let (_dir, session, vault) = setup("alice");
    let err = vault.retrieve(&session, "ghost", "anything").unwrap_err();
    assert!(matches!(err, PassvaultError::NoSuchEntry(ref t) if t == "ghost"));
}

#[test]
fn overwrite_keeps_only_second_plaintext() {
    let (_dir, session, mut vault) = setup("alice");

    let first = vault.store(&session, "note", "first", "k1").unwrap();
    assert!(!first.replaced);
    let second = vault.store(&session, "note", "second", "k2").unwrap();
    assert!(second.replaced);

    assert_eq!(vault.retrieve(&session, "note", "k2").unwrap(), "second");
    // The old passkey no longer matches the stored digest.
    assert!(matches!(
        vault.retrieve(&session, "note", "k1"),
        Err(PassvaultError::IncorrectPasskey)
    ));
    assert_eq!(vault.list_titles(&session), vec!["note".to_string()]);
}

#[test]
fn empty_fields_are_rejected_without_writing() {
    let (dir, session, mut vault) = setup("alice");

    for (title, text, passkey, field) in [
        ("", "text", "key", "title"),
        ("t", "", "key", "text"),
        ("t", "text", "", "passkey"),
    ] {
        let err = vault.store(&session, title, text, passkey).unwrap_err();
        assert!(matches!(err, PassvaultError::MissingField(f) if f == field));
    }

    assert!(!dir.path().join("data.json").exists());
    assert_eq!(vault.entry_count(&session), 0);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn list_titles_in_insertion_order() {
    let (_dir, session, mut vault) = setup("alice");
    assert!(vault.list_titles(&session).is_empty());

    for title in ["zebra", "apple", "mango"] {
        vault.store(&session, title, "x", "k").unwrap();
    }
    // Overwriting keeps the original position.
    vault.store(&session, "zebra", "y", "k").unwrap();

    assert_eq!(vault.list_titles(&session), ["zebra", "apple", "mango"]);

    let entries = vault.list_entries(&session);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].title, "apple");
}

#[test]
fn users_cannot_see_each_others_entries() {
    let dir = TempDir::new().unwrap();
    let mut users = CredentialStore::open(&dir.path().join("users.json")).unwrap();
    users.register("alice", "a").unwrap();
    users.register("bob", "b").unwrap();
    let alice = users.authenticate("alice", "a").unwrap();
    let bob = users.authenticate("bob", "b").unwrap();

    let mut vault = VaultStore::open(&dir.path().join("data.json"), fast_cipher()).unwrap();
    vault.store(&alice, "diary", "dear diary", "same-key").unwrap();

    assert!(vault.list_titles(&bob).is_empty());
    assert!(matches!(
        vault.retrieve(&bob, "diary", "same-key"),
        Err(PassvaultError::NoSuchEntry(_))
    ));
    assert_eq!(vault.entry_count(&alice), 1);
}

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

#[test]
fn data_file_has_expected_shape() {
    let (dir, session, mut vault) = setup("alice");
    let receipt = vault.store(&session, "note", "hello", "p@ss").unwrap();

    let text = fs::read_to_string(dir.path().join("data.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entry = &json["alice"]["note"];

    assert_eq!(entry["encrypted"], receipt.ciphertext.as_str());
    assert_eq!(
        entry["passkey"],
        "a4048cba70dad0be0b01a8bb00027c775386c3f6194943ad3bf37204781edbc5"
    );
    let stamp = entry["timestamp"].as_str().unwrap();
    assert_eq!(stamp.len(), "YYYY-MM-DD HH:MM:SS".len());
    assert_eq!(
        stamp,
        receipt.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    );
}

#[test]
fn opens_file_written_by_earlier_versions() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("users.json"),
        r#"{
    "sam": "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7"
}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("data.json"),
        r#"{
    "sam": {
        "note": {
            "encrypted": "gAAAAABlU_EAAAECAwQFBgcICQoLDA0OD-rkRsIwaeaDreXWAXSmO9USjmGxXWtc7R_9ERtKg6sx8moyS9_FQjE3i2BWCONTwQ==",
            "passkey": "a4048cba70dad0be0b01a8bb00027c775386c3f6194943ad3bf37204781edbc5",
            "timestamp": "2023-11-14 22:13:20"
        }
    }
}"#,
    )
    .unwrap();

    let session = login(&dir, "sam", "hunter2");
    let vault =
        VaultStore::open(&dir.path().join("data.json"), SecretCipher::default()).unwrap();

    assert_eq!(vault.retrieve(&session, "note", "p@ss").unwrap(), "hello world");
    assert_eq!(
        vault.list_entries(&session)[0]
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        "2023-11-14 22:13:20"
    );
}

#[test]
fn digest_match_with_corrupt_token_is_decryption_failure() {
    let dir = TempDir::new().unwrap();
    let mut users = CredentialStore::open(&dir.path().join("users.json")).unwrap();
    users.register("sam", "pw").unwrap();
    let session = users.authenticate("sam", "pw").unwrap();

    fs::write(
        dir.path().join("data.json"),
        r#"{"sam": {"note": {
            "encrypted": "gAAAAAAAAAAAcorrupted",
            "passkey": "a4048cba70dad0be0b01a8bb00027c775386c3f6194943ad3bf37204781edbc5",
            "timestamp": "2023-11-14 22:13:20"
        }}}"#,
    )
    .unwrap();

    let vault = VaultStore::open(&dir.path().join("data.json"), fast_cipher()).unwrap();
    assert!(matches!(
        vault.retrieve(&session, "note", "p@ss"),
        Err(PassvaultError::DecryptionFailed)
    ));
}
