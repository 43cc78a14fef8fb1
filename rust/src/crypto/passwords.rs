//! Password credential codec built around PBKDF2-HMAC-SHA512.
//! Parameters are centralized in [`CodecParams`] so every newly derived record
//! uses the same salt length, key length, and round count. Verification reads
//! its parameters back out of the record instead.

use std::num::NonZeroU32;

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use crate::crypto::integrity::constant_time_eq;
use crate::crypto::kdf::{KdfError, KeyDerivation, Pbkdf2Sha512};
use crate::crypto::record::{self, CredentialRecord, RecordError};

/// Reference round count for newly derived records.
pub const DEFAULT_ITERATIONS: NonZeroU32 = match NonZeroU32::new(1000) {
    Some(n) => n,
    None => panic!("iteration count must be non-zero"),
};
/// Salt length in bytes.
pub const DEFAULT_SALT_LEN: usize = 16;
/// Derived key length in bytes (512 bits).
pub const DEFAULT_KEY_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("malformed credential record: {0}")]
    MalformedRecord(#[from] RecordError),
    #[error("algorithm unavailable: {0}")]
    AlgorithmUnavailable(String),
    #[error("invalid codec parameters: {0}")]
    InvalidParameters(String),
}

impl From<KdfError> for PasswordError {
    fn from(value: KdfError) -> Self {
        match value {
            KdfError::Unavailable(_) => PasswordError::AlgorithmUnavailable(format!("{value}")),
            KdfError::EmptyOutput => PasswordError::InvalidParameters(format!("{value}")),
        }
    }
}

/// Immutable parameters applied when deriving a new record. Built through
/// [`CodecParams::new`], so salt and key lengths are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecParams {
    iterations: NonZeroU32,
    salt_len: usize,
    key_len: usize,
}

impl CodecParams {
    pub fn new(
        iterations: NonZeroU32,
        salt_len: usize,
        key_len: usize,
    ) -> Result<Self, PasswordError> {
        if salt_len == 0 {
            return Err(PasswordError::InvalidParameters(
                "salt length must be positive".to_string(),
            ));
        }
        if key_len == 0 {
            return Err(PasswordError::InvalidParameters(
                "key length must be positive".to_string(),
            ));
        }
        Ok(Self {
            iterations,
            salt_len,
            key_len,
        })
    }

    pub fn iterations(&self) -> NonZeroU32 {
        self.iterations
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            salt_len: DEFAULT_SALT_LEN,
            key_len: DEFAULT_KEY_LEN,
        }
    }
}

/// Derives and verifies credential records. Stateless apart from its
/// parameters, so one codec can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct CredentialCodec<K = Pbkdf2Sha512> {
    params: CodecParams,
    kdf: K,
}

impl CredentialCodec<Pbkdf2Sha512> {
    pub fn new(params: CodecParams) -> Self {
        Self::with_kdf(params, Pbkdf2Sha512)
    }
}

impl Default for CredentialCodec<Pbkdf2Sha512> {
    fn default() -> Self {
        Self::new(CodecParams::default())
    }
}

impl<K: KeyDerivation> CredentialCodec<K> {
    pub fn with_kdf(params: CodecParams, kdf: K) -> Self {
        Self { params, kdf }
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Derives a record for `password` using a fresh salt from the OS random source.
    pub fn derive(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = vec![0u8; self.params.salt_len];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| {
                PasswordError::AlgorithmUnavailable(format!("secure random source: {e}"))
            })?;
        self.derive_with_salt(password, &salt)
    }

    /// Derives a record for `password` with a caller-supplied salt. An empty
    /// salt is refused, since the resulting record could never be verified.
    pub fn derive_with_salt(&self, password: &str, salt: &[u8]) -> Result<String, PasswordError> {
        if salt.is_empty() {
            return Err(PasswordError::InvalidParameters(
                "salt must not be empty".to_string(),
            ));
        }
        let derived_key = self.kdf.derive_key(
            password.as_bytes(),
            salt,
            self.params.iterations,
            self.params.key_len,
        )?;
        Ok(record::encode(self.params.iterations, salt, &derived_key))
    }

    /// Recomputes the key for `password` with the record's own iterations, salt,
    /// and key length, then compares in constant time.
    pub fn verify(&self, password: &str, record: &str) -> Result<bool, PasswordError> {
        let stored: CredentialRecord = record.parse()?;
        let candidate = self.kdf.derive_key(
            password.as_bytes(),
            &stored.salt,
            stored.iterations,
            stored.derived_key.len(),
        )?;
        Ok(constant_time_eq(&stored.derived_key, &candidate))
    }
}

/// Derives a record with the reference parameters.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    CredentialCodec::new(CodecParams::default()).derive(plaintext)
}

/// Verifies a plaintext password against a previously produced record.
pub fn verify_password(plaintext: &str, record: &str) -> Result<bool, PasswordError> {
    CredentialCodec::new(CodecParams::default()).verify(plaintext, record)
}
