//! # docdex
//!
//! Byte-offset indexing for random access into sequentially stored document
//! corpora:
//! - Streaming save pass that records the byte offset of every document
//! - Versioned, checksummed on-disk index file (`<storage>.index`)
//! - `corpus.get(docno)` lookup backed by a single storage seek
//! - Pluggable serializer capability for arbitrary corpus formats
//!
//! **Random access is much slower than iteration!** Every `get` call does a
//! disk seek and re-decodes one document. Use sequential iteration when you
//! want the whole corpus, and reach for the index only when you need
//! specific docnos.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 save_indexed_corpus()                    │
//! │    streams documents, captures per-document offsets      │
//! └───────────────┬───────────────────────┬──────────────────┘
//!                 │                       │
//!                 ▼                       ▼
//!        ┌─────────────────┐     ┌─────────────────┐
//!        │  Storage file   │     │   Index file    │
//!        │  (serializer-   │     │  (OffsetIndex,  │
//!        │   specific)     │     │   DIDX format)  │
//!        └────────┬────────┘     └────────┬────────┘
//!                 │                       │
//!                 ▼                       ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                 IndexedCorpus handle                     │
//! │      get(docno) → index[docno] → seek → decode           │
//! └──────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod index;
pub mod serializer;
pub mod corpus;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DocdexError, Result};
pub use config::Config;
pub use index::{default_index_path, IndexState, OffsetIndex};
pub use serializer::{CorpusSerializer, RecordIter, RecordSerializer};
pub use corpus::{save_indexed_corpus, save_indexed_corpus_with_config, IndexedCorpus};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of docdex
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
