//! HKDF steps of the backup key hierarchy
//!
//! Every label below is a frozen protocol constant. Archives must stay
//! decryptable years after creation, so the labels, the salt choices, and
//! the output lengths never change across versions.

use hkdf::Hkdf;
use sha2::Sha256;

use super::error::BackupKeyError;
use super::material::{
    ACI_LEN, Aci, AccountEntropyPool, BACKUP_ID_LEN, BACKUP_KEY_LEN, BackupId, BackupKey,
    MASTER_KEY_LEN,
};

/// Label for deriving a backup key from the legacy master key
const MASTER_KEY_INFO: &[u8] = b"20231003_Signal_Backups_GenerateBackupKey";

/// Label for deriving a backup key from an account entropy pool
const ENTROPY_POOL_INFO: &[u8] = b"20240801_SIGNAL_BACKUP_KEY";

/// Label for deriving a backup ID from a backup key and an ACI
const BACKUP_ID_INFO: &[u8] = b"20231003_Signal_Backups_GenerateBackupId";

/// Derive a backup key from a legacy 32-byte master key.
///
/// The label here is disjoint from [`derive_backup_key_from_entropy_pool`]'s,
/// so the two paths never produce related keys even when the underlying
/// secrets coincide.
///
/// # Errors
///
/// - `InvalidInputLength`: if `master_key` is not exactly
///   [`MASTER_KEY_LEN`] bytes
pub fn derive_backup_key_from_master_key(
    master_key: &[u8],
) -> Result<BackupKey, BackupKeyError> {
    if master_key.len() != MASTER_KEY_LEN {
        return Err(BackupKeyError::InvalidInputLength {
            field: "master key",
            expected: MASTER_KEY_LEN,
            actual: master_key.len(),
        });
    }

    let hkdf = Hkdf::<Sha256>::new(None, master_key);

    let mut key = [0u8; BACKUP_KEY_LEN];
    let Ok(()) = hkdf.expand(MASTER_KEY_INFO, &mut key) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };

    Ok(BackupKey::new(key))
}

/// Derive a backup key from a validated account entropy pool.
///
/// Deterministic: the same pool always regenerates the same backup key,
/// which is what makes the pool a portable recovery secret.
pub fn derive_backup_key_from_entropy_pool(entropy_pool: &AccountEntropyPool) -> BackupKey {
    let hkdf = Hkdf::<Sha256>::new(None, entropy_pool.as_bytes());

    let mut key = [0u8; BACKUP_KEY_LEN];
    let Ok(()) = hkdf.expand(ENTROPY_POOL_INFO, &mut key) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };

    BackupKey::new(key)
}

/// Derive the backup ID scoping a backup key to one account's archive.
///
/// The ID is recorded with the archive; together with the backup key it is
/// sufficient to reproduce the message backup key, so restoring never needs
/// the original ACI.
pub fn derive_backup_id(backup_key: &BackupKey, aci: &Aci) -> BackupId {
    let hkdf = Hkdf::<Sha256>::new(None, backup_key.as_bytes());

    // Build the info parameter: label || aci
    let mut info = Vec::with_capacity(BACKUP_ID_INFO.len() + ACI_LEN);
    info.extend_from_slice(BACKUP_ID_INFO);
    info.extend_from_slice(aci.as_bytes());

    let mut id = [0u8; BACKUP_ID_LEN];
    let Ok(()) = hkdf.expand(&info, &mut id) else {
        unreachable!("16 bytes is a valid HKDF-SHA256 output length");
    };

    BackupId::from_array(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_aci() -> Aci {
        let mut bytes = [0u8; ACI_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = i as u8;
        }
        Aci::from(bytes)
    }

    #[test]
    fn master_key_derivation_is_deterministic() {
        let master_key = [0x42u8; MASTER_KEY_LEN];

        let key1 = derive_backup_key_from_master_key(&master_key).unwrap();
        let key2 = derive_backup_key_from_master_key(&master_key).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes(), "same input must produce same key");
    }

    #[test]
    fn master_key_derivation_rejects_wrong_length() {
        for len in [0, 31, 33, 64] {
            let result = derive_backup_key_from_master_key(&vec![0u8; len]);
            assert_eq!(
                result.unwrap_err(),
                BackupKeyError::InvalidInputLength {
                    field: "master key",
                    expected: MASTER_KEY_LEN,
                    actual: len,
                }
            );
        }
    }

    #[test]
    fn entropy_pool_derivation_is_deterministic() {
        let pool = AccountEntropyPool::from_validated("a".repeat(64));
        let again = AccountEntropyPool::from_validated("a".repeat(64));

        let key1 = derive_backup_key_from_entropy_pool(&pool);
        let key2 = derive_backup_key_from_entropy_pool(&again);

        assert_eq!(key1.as_bytes(), key2.as_bytes(), "same pool must produce same key");
    }

    #[test]
    fn master_key_and_entropy_pool_paths_are_domain_separated() {
        // Adversarially matched secrets: the pool's UTF-8 bytes equal the
        // master key bytes exactly. The labels must still keep the outputs
        // unrelated.
        let secret = [b'x'; 32];
        let pool = AccountEntropyPool::from_validated("x".repeat(32));

        let from_master = derive_backup_key_from_master_key(&secret).unwrap();
        let from_pool = derive_backup_key_from_entropy_pool(&pool);

        assert_ne!(
            from_master.as_bytes(),
            from_pool.as_bytes(),
            "paths must never collide even with identical input bytes"
        );
    }

    #[test]
    fn backup_id_depends_on_aci() {
        let backup_key = BackupKey::new([7u8; BACKUP_KEY_LEN]);

        let id_a = derive_backup_id(&backup_key, &Aci::from([0u8; ACI_LEN]));
        let id_b = derive_backup_id(&backup_key, &Aci::from([1u8; ACI_LEN]));

        assert_ne!(id_a, id_b, "different accounts must produce different backup ids");
    }

    #[test]
    fn backup_id_depends_on_backup_key() {
        let aci = test_aci();

        let id_a = derive_backup_id(&BackupKey::new([0u8; BACKUP_KEY_LEN]), &aci);
        let id_b = derive_backup_id(&BackupKey::new([1u8; BACKUP_KEY_LEN]), &aci);

        assert_ne!(id_a, id_b, "different backup keys must produce different backup ids");
    }

    #[test]
    fn backup_id_is_deterministic() {
        let backup_key = BackupKey::new([9u8; BACKUP_KEY_LEN]);
        let aci = test_aci();

        assert_eq!(derive_backup_id(&backup_key, &aci), derive_backup_id(&backup_key, &aci));
    }
}
