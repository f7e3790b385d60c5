//! Serializer Module
//!
//! The pluggable capability that ties a concrete corpus format to the
//! offset index. A format only has to do two things to participate in
//! random access:
//! - report where each document landed during a streaming write, and
//! - decode the single document found at a given byte offset.
//!
//! Any format implementing [`CorpusSerializer`] plugs into
//! [`save_indexed_corpus`] and [`IndexedCorpus`] unchanged. The crate ships
//! one such format, [`RecordSerializer`], a length-prefixed bincode record
//! file with per-record checksums.
//!
//! [`save_indexed_corpus`]: crate::corpus::save_indexed_corpus
//! [`IndexedCorpus`]: crate::corpus::IndexedCorpus

mod records;
mod iterator;

use std::io::{Read, Seek};
use std::path::Path;

use crate::error::Result;

pub use records::RecordSerializer;
pub use iterator::RecordIter;

/// Capability contract for corpus storage formats.
///
/// `write_corpus` and `decode_at_offset` are the entire surface the index
/// machinery depends on. Formats that cannot report offsets return
/// `Ok(None)` from `write_corpus`; saving such a corpus with an index fails
/// with `UnsupportedIndexing`, and plain (unindexed) saving remains the
/// format's own business.
pub trait CorpusSerializer {
    /// The document type this format stores
    type Document;

    /// Stream `documents` to a new storage file at `path`.
    ///
    /// Returns `Some(offsets)` with one byte offset per document, in write
    /// order, each pointing at the start of that document's record — or
    /// `None` if this format cannot report offsets.
    fn write_corpus<I>(&self, path: &Path, documents: I) -> Result<Option<Vec<u64>>>
    where
        I: IntoIterator<Item = Self::Document>;

    /// Decode the single document whose record starts at `offset`.
    ///
    /// Costs one seek plus one record read on every call; callers wanting
    /// the whole corpus should iterate sequentially instead.
    fn decode_at_offset<R>(&self, storage: &mut R, offset: u64) -> Result<Self::Document>
    where
        R: Read + Seek;
}
