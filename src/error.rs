//! Error types for catalog record operations.
//!
//! This module provides the [`MarcError`] type for all operations in this
//! crate and the [`Result`] convenience alias.

use thiserror::Error;

/// Error type for all record reading, writing, and codec operations.
///
/// The binary decoder raises exactly the structural-violation kinds named
/// here (`RecordLength` through `RecordWriting`); the streaming dialect
/// readers are permissive and do not raise these; they skip malformed
/// fragments instead.
#[derive(Error, Debug)]
pub enum MarcError {
    /// Header too short to contain a valid total-length field.
    #[error("record length: {0}")]
    RecordLength(String),

    /// Leader bytes could not be decoded.
    #[error("leader: {0}")]
    Leader(String),

    /// Directory length is not a multiple of the 12-byte entry size.
    #[error("directory: {0}")]
    Directory(String),

    /// Zero fields were recovered from an otherwise well-formed record.
    #[error("fields: {0}")]
    Fields(String),

    /// Base address is zero or negative.
    #[error("base address: {0}")]
    BaseAddress(String),

    /// Base address lies at or beyond the end of the record.
    #[error("base address length: {0}")]
    BaseAddressLength(String),

    /// The writer was handed something other than a `Record`.
    #[error("record writing: {0}")]
    RecordWriting(String),

    /// IO error from the underlying source or destination.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for [`std::result::Result`] with [`MarcError`].
pub type Result<T> = std::result::Result<T, MarcError>;
