//! Self-describing credential record: `<iterations>:<salt hex>:<key hex>`.
//! The record carries every parameter needed to re-run the derivation, so a
//! verifier never needs out-of-band configuration.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use thiserror::Error;

const FIELD_SEPARATOR: char = ':';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 3 ':'-separated fields, found {0}")]
    FieldCount(usize),
    #[error("iteration count is not a positive integer: {0:?}")]
    Iterations(String),
    #[error("{field} is not valid hexadecimal: {reason}")]
    Hex { field: &'static str, reason: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Parameters and output of one password derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub iterations: NonZeroU32,
    pub salt: Vec<u8>,
    pub derived_key: Vec<u8>,
}

impl CredentialRecord {
    /// Output length in bits that reproduces the stored key.
    pub fn key_bits(&self) -> usize {
        self.derived_key.len() * 8
    }
}

/// Renders a record straight from borrowed parts, so a freshly derived key can
/// stay in its zeroizing buffer.
pub fn encode(iterations: NonZeroU32, salt: &[u8], derived_key: &[u8]) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        iterations,
        hex::encode(salt),
        hex::encode(derived_key),
        sep = FIELD_SEPARATOR
    )
}

impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.iterations, &self.salt, &self.derived_key))
    }
}

impl FromStr for CredentialRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(FIELD_SEPARATOR).collect();
        let [iterations, salt, derived_key] = fields.as_slice() else {
            return Err(RecordError::FieldCount(fields.len()));
        };

        let iterations = iterations
            .parse::<NonZeroU32>()
            .map_err(|_| RecordError::Iterations((*iterations).to_string()))?;
        let salt = decode_field("salt", salt)?;
        let derived_key = decode_field("derived key", derived_key)?;

        Ok(Self {
            iterations,
            salt,
            derived_key,
        })
    }
}

fn decode_field(field: &'static str, encoded: &str) -> Result<Vec<u8>, RecordError> {
    let bytes = hex::decode(encoded).map_err(|e| RecordError::Hex {
        field,
        reason: format!("{e}"),
    })?;
    if bytes.is_empty() {
        return Err(RecordError::Empty(field));
    }
    Ok(bytes)
}
