//! The message backup key bundle
//!
//! A [`MessageBackupKey`] is the finished output of the key schedule: one
//! HMAC subkey to authenticate an archive and one AES subkey to encrypt it.
//! The bundle is immutable once built and move-only; "re-deriving" always
//! means constructing a new bundle.

use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use super::derivation::{
    derive_backup_id, derive_backup_key_from_entropy_pool, derive_backup_key_from_master_key,
};
use super::error::BackupKeyError;
use super::material::{Aci, AccountEntropyPool, BackupKey};

/// Length in bytes of the HMAC subkey
pub const HMAC_KEY_LEN: usize = 32;

/// Length in bytes of the AES subkey
pub const AES_KEY_LEN: usize = 32;

/// Label for expanding a backup key into the two operational subkeys
const MESSAGE_BACKUP_KEY_INFO: &[u8] = b"20231003_Signal_Backups_EncryptMessageBackup";

/// The two operational subkeys protecting one backup archive.
///
/// Downstream, the HMAC subkey authenticates the archive file and the AES
/// subkey encrypts its contents. Both are always present together; no
/// partially constructed bundle exists.
///
/// The bundle owns its secrets exclusively: it is move-only (no `Clone`)
/// and zeroizes both subkeys exactly once on drop. Reading the subkeys from
/// multiple threads through a shared reference is safe since no read
/// mutates state.
#[derive(PartialEq, Eq)]
pub struct MessageBackupKey {
    /// HMAC-SHA256 subkey signing the backup file
    hmac_key: [u8; HMAC_KEY_LEN],
    /// AES-256 subkey encrypting the backup file
    aes_key: [u8; AES_KEY_LEN],
}

impl MessageBackupKey {
    /// Derive a bundle from a legacy master key and the account's ACI.
    ///
    /// # Errors
    ///
    /// - `InvalidInputLength`: if `master_key` is not exactly
    ///   [`MASTER_KEY_LEN`](super::material::MASTER_KEY_LEN) bytes
    #[deprecated(note = "derive from an account entropy pool instead")]
    pub fn derive_from_master_key(
        master_key: &[u8],
        aci: &Aci,
    ) -> Result<Self, BackupKeyError> {
        let backup_key = derive_backup_key_from_master_key(master_key)?;
        let backup_id = derive_backup_id(&backup_key, aci);
        Ok(Self::expand(&backup_key, backup_id.as_bytes()))
    }

    /// Derive a bundle from a validated account entropy pool and the
    /// account's ACI.
    ///
    /// This is the preferred creation path. Both inputs are typed and
    /// already validated, so derivation cannot fail.
    pub fn derive_from_entropy_pool(entropy_pool: &AccountEntropyPool, aci: &Aci) -> Self {
        let backup_key = derive_backup_key_from_entropy_pool(entropy_pool);
        let backup_id = derive_backup_id(&backup_key, aci);
        Self::expand(&backup_key, backup_id.as_bytes())
    }

    /// Derive a bundle from a backup key and the backup ID recorded with
    /// the archive.
    ///
    /// The restore path: it takes no ACI, so an archive created under one
    /// account identifier can be read under another. The backup ID carries
    /// all the scoping the derivation needs. This follows entropy-pool
    /// derivation rules; it cannot reproduce a bundle created from a master
    /// key unless the matching backup key is supplied.
    ///
    /// # Errors
    ///
    /// - `EmptyBackupId`: if `backup_id` is zero-length
    pub fn derive_from_backup_key(
        backup_key: &BackupKey,
        backup_id: &[u8],
    ) -> Result<Self, BackupKeyError> {
        if backup_id.is_empty() {
            return Err(BackupKeyError::EmptyBackupId);
        }
        Ok(Self::expand(backup_key, backup_id))
    }

    /// Derive a bundle from a raw backup key slice and backup ID.
    ///
    /// # Errors
    ///
    /// - `InvalidInputLength`: if `backup_key` is not exactly
    ///   [`BACKUP_KEY_LEN`](super::material::BACKUP_KEY_LEN) bytes
    /// - `EmptyBackupId`: if `backup_id` is zero-length
    #[deprecated(note = "construct a `BackupKey` and use `derive_from_backup_key`")]
    pub fn derive_from_raw_backup_key(
        backup_key: &[u8],
        backup_id: &[u8],
    ) -> Result<Self, BackupKeyError> {
        let backup_key = BackupKey::from_slice(backup_key)?;
        Self::derive_from_backup_key(&backup_key, backup_id)
    }

    /// Reassemble a bundle from previously derived subkeys.
    ///
    /// Performs no derivation and offers no domain separation; only use it
    /// with subkeys that originated from one of the derivation paths (here
    /// or in an equivalent implementation elsewhere).
    ///
    /// # Errors
    ///
    /// - `InvalidInputLength`: if either subkey is not exactly 32 bytes
    pub fn from_parts(hmac_key: &[u8], aes_key: &[u8]) -> Result<Self, BackupKeyError> {
        let hmac_key: [u8; HMAC_KEY_LEN] =
            hmac_key.try_into().map_err(|_| BackupKeyError::InvalidInputLength {
                field: "hmac key",
                expected: HMAC_KEY_LEN,
                actual: hmac_key.len(),
            })?;
        let aes_key: [u8; AES_KEY_LEN] =
            aes_key.try_into().map_err(|_| BackupKeyError::InvalidInputLength {
                field: "aes key",
                expected: AES_KEY_LEN,
                actual: aes_key.len(),
            })?;
        Ok(Self { hmac_key, aes_key })
    }

    /// HMAC-SHA256 subkey used to sign the backup file.
    pub fn hmac_key(&self) -> &[u8; HMAC_KEY_LEN] {
        &self.hmac_key
    }

    /// AES-256 subkey used to encrypt the backup file.
    pub fn aes_key(&self) -> &[u8; AES_KEY_LEN] {
        &self.aes_key
    }

    /// Expand a backup key, salted with the backup ID, into the bundle.
    ///
    /// The split order (HMAC subkey first) and byte ranges are frozen
    /// constants of the scheme.
    fn expand(backup_key: &BackupKey, backup_id: &[u8]) -> Self {
        let hkdf = Hkdf::<Sha256>::new(Some(backup_id), backup_key.as_bytes());

        let mut okm = [0u8; HMAC_KEY_LEN + AES_KEY_LEN];
        let Ok(()) = hkdf.expand(MESSAGE_BACKUP_KEY_INFO, &mut okm) else {
            unreachable!("64 bytes is a valid HKDF-SHA256 output length");
        };

        let mut hmac_key = [0u8; HMAC_KEY_LEN];
        let mut aes_key = [0u8; AES_KEY_LEN];
        hmac_key.copy_from_slice(&okm[..HMAC_KEY_LEN]);
        aes_key.copy_from_slice(&okm[HMAC_KEY_LEN..]);
        okm.zeroize();

        Self { hmac_key, aes_key }
    }
}

impl Drop for MessageBackupKey {
    fn drop(&mut self) {
        self.hmac_key.zeroize();
        self.aes_key.zeroize();
    }
}

// Redacted: subkeys must never reach logs or panic messages
impl fmt::Debug for MessageBackupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBackupKey").finish_non_exhaustive()
    }
}
