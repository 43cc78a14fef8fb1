//! PBKDF2-HMAC-SHA512 password credentials.
//! A plaintext password becomes a self-describing `iterations:salt:key` record,
//! and a password plus a record is checked with a constant-time comparison.

pub mod config;
pub mod crypto;

pub use crypto::passwords::{
    hash_password, verify_password, CodecParams, CredentialCodec, PasswordError,
};
pub use crypto::record::CredentialRecord;
