//! Key-derivation back-ends. The codec only needs one capability: stretch a
//! password into `output_len` bytes for a given salt and round count. Hiding it
//! behind a trait lets tests substitute a deterministic or failing back-end.

use std::num::NonZeroU32;

use hmac::Hmac;
use sha2::Sha512;
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum KdfError {
    #[error("key derivation primitive unavailable: {0}")]
    Unavailable(String),
    #[error("requested output length must be non-zero")]
    EmptyOutput,
}

/// Password-stretching capability used by the credential codec.
pub trait KeyDerivation {
    fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: NonZeroU32,
        output_len: usize,
    ) -> Result<Zeroizing<Vec<u8>>, KdfError>;
}

/// PBKDF2 with HMAC-SHA512 as the pseudorandom function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pbkdf2Sha512;

impl KeyDerivation for Pbkdf2Sha512 {
    fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: NonZeroU32,
        output_len: usize,
    ) -> Result<Zeroizing<Vec<u8>>, KdfError> {
        if output_len == 0 {
            return Err(KdfError::EmptyOutput);
        }
        let mut output = Zeroizing::new(vec![0u8; output_len]);
        pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, iterations.get(), &mut output)
            .map_err(|e| KdfError::Unavailable(format!("{e}")))?;
        Ok(output)
    }
}
