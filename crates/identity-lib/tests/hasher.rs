// crates/identity-lib/tests/hasher.rs
use identity_lib::{CredentialHasher, ScryptHasher};

fn fast_hasher() -> ScryptHasher {
    ScryptHasher::with_params(8, 8, 1).unwrap()
}

#[tokio::test]
async fn test_hash_and_verify() {
    let hasher = fast_hasher();
    let plain = "correct horse battery staple";

    let digest = hasher.hash(plain).await.unwrap();

    // digest is one-way: never the plaintext
    assert_ne!(digest, plain);
    assert!(hasher.verify(plain, &digest).await);
    assert!(!hasher.verify("wrong password", &digest).await);
}

#[tokio::test]
async fn test_digest_is_self_describing() {
    let hasher = fast_hasher();
    let digest = hasher.hash("secret123").await.unwrap();

    // PHC string format: algorithm id and cost parameters are embedded,
    // so stored digests survive a future parameter change
    assert!(digest.starts_with("$scrypt$"));
    assert!(digest.contains("ln=8"));
}

#[tokio::test]
async fn test_hashing_twice_salts_differently() {
    let hasher = fast_hasher();

    let first = hasher.hash("secret123").await.unwrap();
    let second = hasher.hash("secret123").await.unwrap();

    assert_ne!(first, second);
    assert!(hasher.verify("secret123", &first).await);
    assert!(hasher.verify("secret123", &second).await);
}

#[tokio::test]
async fn test_malformed_digest_never_verifies() {
    let hasher = fast_hasher();

    assert!(!hasher.verify("secret123", "").await);
    assert!(!hasher.verify("secret123", "not-a-phc-string").await);
    assert!(!hasher.verify("secret123", "$unknown$v=1$abc").await);
}

#[tokio::test]
async fn test_invalid_cost_parameters_are_rejected() {
    // log_n of 0 is not a valid scrypt cost
    assert!(ScryptHasher::with_params(0, 8, 1).is_err());
}
