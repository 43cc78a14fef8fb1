//! Cryptography for credential records: key derivation, the record encoding,
//! constant-time comparison, and the codec that ties them together. Each
//! submodule has a single responsibility so the security model stays auditable.

pub mod integrity;
pub mod kdf;
pub mod passwords;
pub mod record;
