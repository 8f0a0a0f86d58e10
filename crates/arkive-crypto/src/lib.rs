//! Arkive Backup Key Schedule
//!
//! Derives the symmetric key material that encrypts and authenticates a
//! message-backup archive. Pure functions with deterministic outputs; no
//! I/O, no persistence, no shared state between calls.
//!
//! # Key Hierarchy
//!
//! A backup is protected by a [`MessageBackupKey`], a bundle of one HMAC
//! subkey and one AES subkey. The bundle is reachable from several starting
//! secrets, each through its own domain-separated HKDF step, so that keys
//! derived along different paths are never interchangeable:
//!
//! ```text
//! Master Key (legacy)      Account Entropy Pool
//!        │                         │
//!        ▼ HKDF                    ▼ HKDF
//!        └────────► Backup Key ◄───┘
//!                       │
//!                       ▼ HKDF (+ ACI)
//!                   Backup ID
//!                       │
//!                       ▼ HKDF (backup key, salted with backup ID)
//!               MessageBackupKey
//!                (HMAC key ‖ AES key)
//! ```
//!
//! Restoring on a new device skips the top of the hierarchy: a transported
//! [`BackupKey`] plus the backup ID recorded with the archive reproduce the
//! same bundle without any account identifier, so a backup created under one
//! ACI can be read under another.
//!
//! # Security
//!
//! Domain Separation:
//! - Each derivation step uses a distinct fixed info label
//! - Master-key and entropy-pool paths never collide, even for the same
//!   account and adversarially chosen secrets
//!
//! Determinism:
//! - Identical inputs always reproduce the identical bundle
//! - The labels and the HMAC/AES split are frozen protocol constants;
//!   archives must stay decryptable years after creation
//!
//! Key Hygiene:
//! - Backup keys, entropy pools, and derived bundles zeroize on drop
//! - [`MessageBackupKey`] is move-only with a single drop path

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod backup_keys;

pub use backup_keys::{
    ACI_LEN, AES_KEY_LEN, Aci, AccountEntropyPool, BACKUP_ID_LEN, BACKUP_KEY_LEN, BackupId,
    BackupKey, BackupKeyError, HMAC_KEY_LEN, MASTER_KEY_LEN, MessageBackupKey,
    derive_backup_id, derive_backup_key_from_entropy_pool, derive_backup_key_from_master_key,
};
