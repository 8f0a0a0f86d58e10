//! Fuzz target for the backup key schedule
//!
//! Drives adversarial inputs through every derivation path.
//!
//! # Strategy
//!
//! - Arbitrary-length master keys, backup keys, ACIs (empty, short, long)
//! - Arbitrary UTF-8 entropy pools
//! - Arbitrary backup IDs including empty
//! - Subkey reassembly via from_parts
//!
//! # Invariants
//!
//! - Wrong-length inputs return errors, never panic
//! - Derivation is deterministic (same inputs → same bundle)
//! - Master-key and entropy-pool paths never collide
//! - Restore path depends only on (backup key, backup id)
//! - from_parts reproduces any derived bundle exactly

#![no_main]
#![allow(deprecated)]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use arkive_crypto::{Aci, AccountEntropyPool, BackupKey, MessageBackupKey};

#[derive(Debug, Arbitrary)]
struct BackupKeyScenario {
    /// Master key candidate (any length)
    master_key: Vec<u8>,
    /// ACI candidate (any length)
    aci_bytes: Vec<u8>,
    /// Entropy pool candidate
    entropy_pool: String,
    /// Backup key candidate (any length)
    backup_key: Vec<u8>,
    /// Backup ID candidate (any length, including empty)
    backup_id: Vec<u8>,
}

fuzz_target!(|scenario: BackupKeyScenario| {
    // INVARIANT 1: ACI construction checks width, never panics
    let aci = Aci::from_bytes(&scenario.aci_bytes);
    assert_eq!(aci.is_ok(), scenario.aci_bytes.len() == 16);

    if let Ok(aci) = aci {
        // INVARIANT 2: master-key path errors exactly on wrong length
        let from_master = MessageBackupKey::derive_from_master_key(&scenario.master_key, &aci);
        assert_eq!(from_master.is_ok(), scenario.master_key.len() == 32);

        // INVARIANT 3: both creation paths are deterministic
        let pool = AccountEntropyPool::from_validated(scenario.entropy_pool.clone());
        let from_pool = MessageBackupKey::derive_from_entropy_pool(&pool, &aci);
        let pool_again = AccountEntropyPool::from_validated(scenario.entropy_pool.clone());
        let from_pool_again = MessageBackupKey::derive_from_entropy_pool(&pool_again, &aci);
        assert!(from_pool == from_pool_again, "entropy pool path must be deterministic");

        // INVARIANT 4: domain separation even when secrets coincide
        if scenario.entropy_pool.len() == 32 {
            let overlap =
                MessageBackupKey::derive_from_master_key(scenario.entropy_pool.as_bytes(), &aci);
            if let Ok(overlap) = overlap {
                assert!(overlap != from_pool, "paths must be domain separated");
            }
        }

        // INVARIANT 5: from_parts round-trips the derived bundle
        let rebuilt =
            MessageBackupKey::from_parts(from_pool.hmac_key(), from_pool.aes_key())
                .expect("derived subkeys have canonical lengths");
        assert!(rebuilt == from_pool);
    }

    // INVARIANT 6: restore path errors exactly on bad key length or empty id
    let restored = MessageBackupKey::derive_from_raw_backup_key(
        &scenario.backup_key,
        &scenario.backup_id,
    );
    assert_eq!(
        restored.is_ok(),
        scenario.backup_key.len() == 32 && !scenario.backup_id.is_empty()
    );

    // INVARIANT 7: restore depends only on (backup key, backup id)
    if let Ok(restored) = restored {
        let key = BackupKey::from_slice(&scenario.backup_key)
            .expect("length was checked by the raw overload");
        let again = MessageBackupKey::derive_from_backup_key(&key, &scenario.backup_id)
            .expect("same inputs as the raw overload");
        assert!(restored == again, "restore must be a pure function of its two inputs");
    }
});
