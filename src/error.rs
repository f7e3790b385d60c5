//! Error types for docdex
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DocdexError
pub type Result<T> = std::result::Result<T, DocdexError>;

/// Unified error type for docdex operations
#[derive(Debug, Error)]
pub enum DocdexError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Save-Time Errors
    // -------------------------------------------------------------------------
    #[error("serializer {serializer} does not support indexing (no offsets reported)")]
    UnsupportedIndexing { serializer: &'static str },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("cannot access documents by docno without an index")]
    NoIndex,

    #[error("docno {docno} out of range for corpus of {len} documents")]
    DocnoOutOfRange { docno: usize, len: usize },

    // -------------------------------------------------------------------------
    // Index File Errors
    // -------------------------------------------------------------------------
    /// Index file failed to parse (bad magic, version, length, or checksum).
    ///
    /// Surfaced only by the strict [`OffsetIndex::load`] path; the open path
    /// absorbs it into [`IndexState::Absent`].
    ///
    /// [`OffsetIndex::load`]: crate::index::OffsetIndex::load
    /// [`IndexState::Absent`]: crate::index::IndexState::Absent
    #[error("index format error: {0}")]
    IndexFormat(String),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("storage error: {0}")]
    Storage(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("serialization error: {0}")]
    Serialization(String),
}
