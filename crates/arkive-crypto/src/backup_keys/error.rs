//! Error types for backup key derivation

use thiserror::Error;

/// Errors from backup key schedule operations
///
/// Every error is surfaced synchronously by the failing constructor. None
/// of them is retryable: re-running a derivation with the same input cannot
/// succeed, and choosing different input is the caller's decision.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackupKeyError {
    /// A fixed-length input did not match its required size
    #[error("invalid {field} length: expected {expected}, got {actual}")]
    InvalidInputLength {
        /// Which input was the wrong size
        field: &'static str,
        /// Required length in bytes
        expected: usize,
        /// Length that was actually supplied
        actual: usize,
    },

    /// The restore path was given a zero-length backup ID
    #[error("backup id must not be empty")]
    EmptyBackupId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err =
            BackupKeyError::InvalidInputLength { field: "master key", expected: 32, actual: 31 };
        assert_eq!(err.to_string(), "invalid master key length: expected 32, got 31");
    }

    #[test]
    fn empty_backup_id_display() {
        assert_eq!(BackupKeyError::EmptyBackupId.to_string(), "backup id must not be empty");
    }
}
