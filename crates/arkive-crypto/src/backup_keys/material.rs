//! Input and intermediate key material types
//!
//! Fixed-length inputs are checked once at construction. Downstream
//! derivation relies on those guarantees instead of re-checking.

use std::fmt;

use zeroize::Zeroize;

use super::error::BackupKeyError;

/// Length in bytes of the legacy master key input
pub const MASTER_KEY_LEN: usize = 32;

/// Length in bytes of a backup key
pub const BACKUP_KEY_LEN: usize = 32;

/// Length in bytes of the fixed-width ACI encoding
pub const ACI_LEN: usize = 16;

/// Length in bytes of a derived backup ID
pub const BACKUP_ID_LEN: usize = 16;

/// Fixed-width binary encoding of an account identifier (ACI).
///
/// Treated as an opaque byte sequence; no semantic validation is performed
/// beyond the width check. The account-identity provider owns the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aci([u8; ACI_LEN]);

impl Aci {
    /// Wrap a fixed-width ACI encoding, checking its length.
    ///
    /// # Errors
    ///
    /// - `InvalidInputLength`: if `bytes` is not exactly [`ACI_LEN`] bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BackupKeyError> {
        let encoded: [u8; ACI_LEN] =
            bytes.try_into().map_err(|_| BackupKeyError::InvalidInputLength {
                field: "aci",
                expected: ACI_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(encoded))
    }

    /// Fixed-width binary encoding of this identifier.
    pub fn as_bytes(&self) -> &[u8; ACI_LEN] {
        &self.0
    }
}

impl From<[u8; ACI_LEN]> for Aci {
    fn from(bytes: [u8; ACI_LEN]) -> Self {
        Self(bytes)
    }
}

/// A validated account entropy pool.
///
/// The pool is the portable top-level secret from which per-account keys
/// are regenerated. Validation (format and generation) belongs to the
/// entropy-pool provider: passing an arbitrary, unvalidated string here is
/// a programmer error, not a runtime-recoverable condition, and this type
/// performs no re-validation.
pub struct AccountEntropyPool(String);

impl AccountEntropyPool {
    /// Wrap an entropy pool string that the provider has already validated.
    pub fn from_validated(pool: impl Into<String>) -> Self {
        Self(pool.into())
    }

    /// UTF-8 bytes of the pool, used as HKDF input key material.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Drop for AccountEntropyPool {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// The 32-byte root secret of the backup key hierarchy.
///
/// Obtained externally (generated randomly, or transported from another
/// device) or produced by this crate's own derivation from a master key or
/// entropy pool. Length is guaranteed at construction. Move-only: the
/// secret has exactly one owner and is zeroized exactly once.
pub struct BackupKey([u8; BACKUP_KEY_LEN]);

impl BackupKey {
    /// Wrap an externally produced backup key.
    pub fn new(bytes: [u8; BACKUP_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Wrap a backup key supplied as a slice, checking its length.
    ///
    /// # Errors
    ///
    /// - `InvalidInputLength`: if `bytes` is not exactly
    ///   [`BACKUP_KEY_LEN`] bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, BackupKeyError> {
        let key: [u8; BACKUP_KEY_LEN] =
            bytes.try_into().map_err(|_| BackupKeyError::InvalidInputLength {
                field: "backup key",
                expected: BACKUP_KEY_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(key))
    }

    /// Raw key bytes, used as HKDF input key material.
    pub fn as_bytes(&self) -> &[u8; BACKUP_KEY_LEN] {
        &self.0
    }
}

impl Drop for BackupKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

// Redacted: the key bytes must never reach logs or panic messages
impl fmt::Debug for BackupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackupKey").finish_non_exhaustive()
    }
}

/// A backup ID derived from a backup key and an ACI.
///
/// Scopes key material to one backup. Recorded alongside the archive so
/// the restore path can reproduce the bundle without the original ACI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupId([u8; BACKUP_ID_LEN]);

impl BackupId {
    pub(crate) fn from_array(bytes: [u8; BACKUP_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Wrap a previously recorded backup ID, checking its length.
    ///
    /// # Errors
    ///
    /// - `InvalidInputLength`: if `bytes` is not exactly
    ///   [`BACKUP_ID_LEN`] bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BackupKeyError> {
        let id: [u8; BACKUP_ID_LEN] =
            bytes.try_into().map_err(|_| BackupKeyError::InvalidInputLength {
                field: "backup id",
                expected: BACKUP_ID_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(id))
    }

    /// Raw ID bytes.
    pub fn as_bytes(&self) -> &[u8; BACKUP_ID_LEN] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aci_accepts_exact_width() {
        let aci = Aci::from_bytes(&[0u8; ACI_LEN]).unwrap();
        assert_eq!(aci.as_bytes(), &[0u8; ACI_LEN]);
    }

    #[test]
    fn aci_rejects_short_and_long() {
        for len in [0, 15, 17, 32] {
            let result = Aci::from_bytes(&vec![0u8; len]);
            assert_eq!(
                result.unwrap_err(),
                BackupKeyError::InvalidInputLength { field: "aci", expected: ACI_LEN, actual: len }
            );
        }
    }

    #[test]
    fn backup_key_accepts_exact_length() {
        let key = BackupKey::from_slice(&[0xAB; BACKUP_KEY_LEN]).unwrap();
        assert_eq!(key.as_bytes(), &[0xAB; BACKUP_KEY_LEN]);
    }

    #[test]
    fn backup_key_rejects_off_by_one() {
        for len in [31, 33] {
            let result = BackupKey::from_slice(&vec![0u8; len]);
            assert_eq!(
                result.unwrap_err(),
                BackupKeyError::InvalidInputLength {
                    field: "backup key",
                    expected: BACKUP_KEY_LEN,
                    actual: len,
                }
            );
        }
    }

    #[test]
    fn backup_id_round_trips_through_bytes() {
        let id = BackupId::from_bytes(&[7u8; BACKUP_ID_LEN]).unwrap();
        assert_eq!(BackupId::from_bytes(id.as_bytes()).unwrap(), id);
    }

    #[test]
    fn backup_id_rejects_wrong_length() {
        assert!(BackupId::from_bytes(&[0u8; 15]).is_err());
        assert!(BackupId::from_bytes(&[0u8; 17]).is_err());
    }

    #[test]
    fn entropy_pool_exposes_utf8_bytes() {
        let pool = AccountEntropyPool::from_validated("abcd");
        assert_eq!(pool.as_bytes(), b"abcd");
    }

    #[test]
    fn backup_key_debug_never_prints_key_bytes() {
        let key = BackupKey::from_slice(&[0xAB; BACKUP_KEY_LEN]).unwrap();

        let rendered = format!("{key:?}");
        assert_eq!(rendered, "BackupKey { .. }");
        assert!(!rendered.contains("171"), "debug output must not leak key bytes");
    }
}
