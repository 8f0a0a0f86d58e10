//! Backup Keys: the key schedule feeding backup encryption
//!
//! This module owns every derivation step between a caller's starting
//! secret and the two operational subkeys that protect an archive:
//!
//! - Control inputs: a legacy master key, a validated account entropy
//!   pool, or a transported backup key
//! - Output: a [`MessageBackupKey`] holding the HMAC and AES subkeys
//!
//! # Architecture
//!
//! ```text
//! Master Key ──HKDF──┐
//!                    ├──► BackupKey ──HKDF(+ACI)──► BackupId
//! Entropy Pool ─HKDF─┘         │                       │
//!                              └──────HKDF(salt)───────┘
//!                                        │
//!                                        ▼
//!                                MessageBackupKey
//! ```
//!
//! # Security Properties
//!
//! - Domain Separation: every arrow above carries its own fixed info label
//! - Determinism: same inputs reproduce the same bundle indefinitely
//! - Account Binding: create-time backup IDs are scoped to an ACI; the
//!   restore path deliberately takes no ACI so archives survive account
//!   changes

pub mod derivation;
pub mod error;
pub mod key;
pub mod material;

pub use derivation::{
    derive_backup_id, derive_backup_key_from_entropy_pool, derive_backup_key_from_master_key,
};
pub use error::BackupKeyError;
pub use key::{AES_KEY_LEN, HMAC_KEY_LEN, MessageBackupKey};
pub use material::{
    ACI_LEN, Aci, AccountEntropyPool, BACKUP_ID_LEN, BACKUP_KEY_LEN, BackupId, BackupKey,
    MASTER_KEY_LEN,
};
