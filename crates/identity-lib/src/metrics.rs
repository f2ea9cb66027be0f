// ==============
// crates/identity-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const IDENTITY_REGISTERED: &str = "identity.registered";
pub const REGISTER_CONFLICT: &str = "identity.register_conflict";
pub const VERIFY_OK: &str = "identity.verify_ok";
pub const VERIFY_REJECTED: &str = "identity.verify_rejected";
pub const LOOKUP_MISS: &str = "identity.lookup_miss";
