//! Indexed Corpus
//!
//! The random-access handle over a storage file plus its offset index, and
//! the save routine that produces the pair.
//!
//! A handle is constructed in one of two states and stays there for its
//! lifetime:
//! - **IndexLoaded** — the index file parsed; `get(docno)` works.
//! - **NoIndex** — no usable index file; `get` fails, sequential iteration
//!   (where the format supports it) is unaffected.
//!
//! `get` does a disk seek and a fresh decode on every call. It is
//! deliberately not cached and deliberately slower per document than a
//! sequential scan; it exists for the "give me document 40724" case, not
//! for walking the corpus.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::index::{IndexState, OffsetIndex};
use crate::serializer::CorpusSerializer;
use crate::DocdexError;

// =============================================================================
// Save Path
// =============================================================================

/// Save a document stream to `storage_path` along with its offset index.
///
/// Drives the serializer's streaming write, then persists the reported
/// offsets to `<storage_path>.index`, overwriting any index already there.
/// Returns the offsets, one per document in write order.
///
/// Fails with [`DocdexError::UnsupportedIndexing`] when the serializer
/// cannot report offsets; in that case no index file is written (the
/// storage file is whatever the serializer left behind).
///
/// There is no partial-write recovery: a crash between the storage write
/// and the index write leaves a missing or stale index, which a later open
/// treats as the NoIndex state rather than an error.
pub fn save_indexed_corpus<S, I>(
    serializer: &S,
    storage_path: impl AsRef<Path>,
    documents: I,
) -> Result<Vec<u64>>
where
    S: CorpusSerializer,
    I: IntoIterator<Item = S::Document>,
{
    save_indexed_corpus_with_config(serializer, storage_path, documents, &Config::default())
}

/// Like [`save_indexed_corpus`], with explicit index path and durability
/// options.
pub fn save_indexed_corpus_with_config<S, I>(
    serializer: &S,
    storage_path: impl AsRef<Path>,
    documents: I,
    config: &Config,
) -> Result<Vec<u64>>
where
    S: CorpusSerializer,
    I: IntoIterator<Item = S::Document>,
{
    let storage_path = storage_path.as_ref();
    let index_path = config.resolve_index_path(storage_path);

    let offsets = serializer
        .write_corpus(storage_path, documents)?
        .ok_or(DocdexError::UnsupportedIndexing {
            serializer: std::any::type_name::<S>(),
        })?;

    let index = OffsetIndex::from(offsets);
    index.save(&index_path, config.sync_on_save)?;

    tracing::info!(
        "saved corpus of {} documents to {}, index to {}",
        index.len(),
        storage_path.display(),
        index_path.display()
    );

    Ok(index.offsets().to_vec())
}

// =============================================================================
// IndexedCorpus Handle
// =============================================================================

/// Random-access handle over a saved corpus.
///
/// Owns the offset index (when one loaded) and an open buffered reader on
/// the storage file; does not own the storage content itself. Multiple
/// read-only handles over the same storage+index pair are safe, each with
/// an independent in-memory copy of the index.
pub struct IndexedCorpus<S: CorpusSerializer> {
    serializer: S,
    storage: BufReader<File>,
    storage_path: PathBuf,
    index: IndexState,
}

impl<S: CorpusSerializer> std::fmt::Debug for IndexedCorpus<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedCorpus")
            .field("storage_path", &self.storage_path)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<S: CorpusSerializer> IndexedCorpus<S> {
    /// Open a corpus for random access, loading the index from
    /// `<storage_path>.index`.
    ///
    /// A missing or unopenable storage file is an error. A missing or
    /// unparseable index file is not: the handle comes up in the NoIndex
    /// state and only `get` calls fail.
    pub fn open(serializer: S, storage_path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(serializer, storage_path, &Config::default())
    }

    /// Like [`IndexedCorpus::open`], with explicit index path and
    /// integrity options.
    pub fn open_with_config(
        serializer: S,
        storage_path: impl AsRef<Path>,
        config: &Config,
    ) -> Result<Self> {
        let storage_path = storage_path.as_ref().to_path_buf();
        let index_path = config.resolve_index_path(&storage_path);

        let storage = BufReader::new(File::open(&storage_path)?);
        let index = IndexState::load(&index_path, config.verify_checksum);

        Ok(Self {
            serializer,
            storage,
            storage_path,
            index,
        })
    }

    /// Fetch document `docno` via the index.
    ///
    /// Resolving the offset is O(1); the decode behind it costs a storage
    /// seek. A failed call leaves the handle usable.
    pub fn get(&mut self, docno: usize) -> Result<S::Document> {
        let index = match &self.index {
            IndexState::Loaded(index) => index,
            IndexState::Absent => return Err(DocdexError::NoIndex),
        };

        let offset = index.get(docno).ok_or(DocdexError::DocnoOutOfRange {
            docno,
            len: index.len(),
        })?;

        self.serializer.decode_at_offset(&mut self.storage, offset)
    }

    /// Whether this handle supports random access
    pub fn has_index(&self) -> bool {
        self.index.is_loaded()
    }

    /// Number of indexed documents, or `None` in the NoIndex state
    pub fn doc_count(&self) -> Option<usize> {
        match &self.index {
            IndexState::Loaded(index) => Some(index.len()),
            IndexState::Absent => None,
        }
    }

    /// The loaded offset index, if any
    pub fn index(&self) -> Option<&OffsetIndex> {
        match &self.index {
            IndexState::Loaded(index) => Some(index),
            IndexState::Absent => None,
        }
    }

    /// Path of the underlying storage file
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }
}
