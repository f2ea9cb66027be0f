// crates/identity-lib/tests/service.rs
use std::sync::Arc;

use identity_lib::{
    AppError, CredentialService, InMemoryIdentityStore, NewIdentity, ScryptHasher, UserRole,
};

// reduced scrypt cost so the suite stays fast
fn test_service() -> CredentialService {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let store = Arc::new(InMemoryIdentityStore::new());
    let hasher = Arc::new(ScryptHasher::with_params(8, 8, 1).unwrap());
    CredentialService::new(store, hasher)
}

fn alice() -> NewIdentity {
    NewIdentity {
        identifier: "alice@example.com".to_string(),
        password: "secret123".to_string(),
        display_name: "Alice".to_string(),
        avatar_ref: None,
    }
}

#[tokio::test]
async fn test_register_verify_lookup_scenario() {
    let service = test_service();

    // register alice@example.com / secret123
    let registered = service.register(alice()).await.unwrap();
    assert_eq!(registered.identifier, "alice@example.com");
    assert_eq!(registered.role, UserRole::User);
    assert_eq!(registered.avatar_ref, "");
    assert!(registered.is_persisted());

    // verify with the original password returns the same identity
    let verified = service
        .verify("alice@example.com", "secret123")
        .await
        .unwrap();
    assert_eq!(verified.id, registered.id);
    assert_eq!(verified.identifier, "alice@example.com");

    // wrong password is rejected
    let err = service
        .verify("alice@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    // registering the same identifier again conflicts, whatever the password
    let mut again = alice();
    again.password = "other".to_string();
    let err = service.register(again).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict));

    // lookup by the assigned id resolves the identity
    let looked_up = service.lookup(&registered.id).await.unwrap();
    assert_eq!(looked_up.identifier, "alice@example.com");

    // unknown id does not
    let err = service.lookup("nonexistent-id").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_verify_unknown_identifier_is_not_found() {
    let service = test_service();

    let err = service
        .verify("nobody@example.com", "whatever")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_registered_identity_never_exposes_plaintext() {
    let service = test_service();

    let registered = service.register(alice()).await.unwrap();
    assert_ne!(registered.credential_hash, "secret123");
    assert!(!registered.credential_hash.is_empty());
    assert!(!registered.credential_hash.contains("secret123"));
}

#[tokio::test]
async fn test_same_password_hashes_differently_per_identity() {
    let service = test_service();

    let first = service.register(alice()).await.unwrap();
    let second = service
        .register(NewIdentity {
            identifier: "bob@example.com".to_string(),
            password: "secret123".to_string(),
            display_name: "Bob".to_string(),
            avatar_ref: None,
        })
        .await
        .unwrap();

    // fresh salt per registration
    assert_ne!(first.credential_hash, second.credential_hash);

    // yet both verify against the shared plaintext
    assert!(service.verify("alice@example.com", "secret123").await.is_ok());
    assert!(service.verify("bob@example.com", "secret123").await.is_ok());
}

#[tokio::test]
async fn test_avatar_ref_is_kept_when_supplied() {
    let service = test_service();

    let registered = service
        .register(NewIdentity {
            identifier: "carol@example.com".to_string(),
            password: "secret123".to_string(),
            display_name: "Carol".to_string(),
            avatar_ref: Some("avatars/carol.png".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(registered.avatar_ref, "avatars/carol.png");
}

#[tokio::test]
async fn test_concurrent_registration_yields_one_identity() {
    let service = test_service();

    // both tasks race past the advisory lookup; the store arbitrates
    let a = service.register(alice());
    let b = service.register(alice());
    let (first, second) = tokio::join!(a, b);

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let conflict = if first.is_err() { first } else { second };
    assert!(matches!(conflict.unwrap_err(), AppError::Conflict));
}
