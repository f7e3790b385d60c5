//! Offset Index
//!
//! The ordered table of per-document byte offsets, plus its on-disk
//! container. Position in the table is the docno (0-based), so resolving a
//! docno to a storage offset is a single slice access.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (14 bytes)                                       │
//! │   Magic: "DIDX" (4) | Version: u16 (2) | Count: u64 (8) │
//! ├─────────────────────────────────────────────────────────┤
//! │ Body (Count × 8 bytes)                                  │
//! │   Offset: u64 LE, one per document, in docno order      │
//! ├─────────────────────────────────────────────────────────┤
//! │ Footer (4 bytes)                                        │
//! │   CRC32 of header + body                                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Any deviation — wrong magic, unknown version, count/body mismatch, bad
//! CRC — is a format error, never undefined behavior. The strict
//! [`OffsetIndex::load`] surfaces it; the open-path [`IndexState::load`]
//! reduces it to [`IndexState::Absent`].

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::DocdexError;

// =============================================================================
// Shared Constants
// =============================================================================

/// Magic bytes identifying a docdex index file
pub(crate) const MAGIC: &[u8; 4] = b"DIDX";

/// Current index format version
pub(crate) const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + Count (8) = 14 bytes
pub(crate) const HEADER_SIZE: usize = 14;

/// Footer size: CRC32 (4)
pub(crate) const FOOTER_SIZE: usize = 4;

/// Suffix appended to the storage file name to derive the index path
pub(crate) const INDEX_SUFFIX: &str = ".index";

/// Derive the default index path for a storage file.
///
/// Appends `.index` to the full file name (`corpus.bin` → `corpus.bin.index`),
/// so the storage file's own extension survives. Both the save and the open
/// path use this derivation, which is what keeps them in agreement when no
/// explicit index path is given.
pub fn default_index_path(storage_path: &Path) -> PathBuf {
    let mut name = storage_path.as_os_str().to_os_string();
    name.push(INDEX_SUFFIX);
    PathBuf::from(name)
}

// =============================================================================
// OffsetIndex
// =============================================================================

/// Ordered table of byte offsets, one per document, in docno order.
///
/// Immutable after construction: an index is built in one pass during a save
/// and reloaded whole at open time. Rebuilding the corpus is the only way to
/// change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetIndex {
    offsets: Vec<u64>,
}

impl OffsetIndex {
    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Byte offset of document `docno`, or `None` when out of range
    pub fn get(&self, docno: usize) -> Option<u64> {
        self.offsets.get(docno).copied()
    }

    /// All offsets in docno order
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Write the index to `path`, overwriting any existing file.
    ///
    /// With `sync` set, the file is fsynced before returning.
    pub fn save(&self, path: &Path, sync: bool) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::new(file);
        let mut hasher = crc32fast::Hasher::new();

        // Header
        let count = self.offsets.len() as u64;
        writer.write_all(MAGIC)?;
        writer.write_all(&VERSION.to_le_bytes())?;
        writer.write_all(&count.to_le_bytes())?;
        hasher.update(MAGIC);
        hasher.update(&VERSION.to_le_bytes());
        hasher.update(&count.to_le_bytes());

        // Body
        for offset in &self.offsets {
            let bytes = offset.to_le_bytes();
            writer.write_all(&bytes)?;
            hasher.update(&bytes);
        }

        // Footer
        writer.write_all(&hasher.finalize().to_le_bytes())?;
        writer.flush()?;

        if sync {
            let file = writer.into_inner().map_err(|e| {
                DocdexError::Storage(format!("failed to flush index file: {}", e))
            })?;
            file.sync_all()?;
        }

        Ok(())
    }

    /// Strictly load an index from `path`.
    ///
    /// Every failure kind surfaces as an error here: missing file as `Io`,
    /// truncation, bad magic, unknown version, count mismatch, or (when
    /// `verify_checksum` is set) CRC mismatch as `IndexFormat`. The lenient
    /// open-path wrapper is [`IndexState::load`].
    pub fn load(path: &Path, verify_checksum: bool) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        if data.len() < HEADER_SIZE + FOOTER_SIZE {
            return Err(DocdexError::IndexFormat(format!(
                "index file too short: {} bytes",
                data.len()
            )));
        }

        // Header
        if &data[0..4] != MAGIC {
            return Err(DocdexError::IndexFormat(format!(
                "invalid index magic: expected DIDX, got {:?}",
                &data[0..4]
            )));
        }

        let version = u16::from_le_bytes(data[4..6].try_into().unwrap());
        if version != VERSION {
            return Err(DocdexError::IndexFormat(format!(
                "unsupported index version: {}",
                version
            )));
        }

        // The count field is untrusted; size arithmetic must not overflow
        let count = u64::from_le_bytes(data[6..14].try_into().unwrap());
        let expected_len = count
            .checked_mul(8)
            .and_then(|body| body.checked_add((HEADER_SIZE + FOOTER_SIZE) as u64))
            .ok_or_else(|| {
                DocdexError::IndexFormat(format!("implausible index entry count: {}", count))
            })?;
        if data.len() as u64 != expected_len {
            return Err(DocdexError::IndexFormat(format!(
                "index length mismatch: {} entries need {} bytes, file has {}",
                count,
                expected_len,
                data.len()
            )));
        }
        let count = count as usize;

        // Footer
        if verify_checksum {
            let body_end = data.len() - FOOTER_SIZE;
            let stored_crc = u32::from_le_bytes(data[body_end..].try_into().unwrap());
            let actual_crc = crc32fast::hash(&data[..body_end]);
            if stored_crc != actual_crc {
                return Err(DocdexError::IndexFormat(format!(
                    "index checksum mismatch: stored {:08x}, computed {:08x}",
                    stored_crc, actual_crc
                )));
            }
        }

        // Body
        let mut offsets = Vec::with_capacity(count);
        for i in 0..count {
            let start = HEADER_SIZE + i * 8;
            offsets.push(u64::from_le_bytes(
                data[start..start + 8].try_into().unwrap(),
            ));
        }

        Ok(Self { offsets })
    }
}

impl From<Vec<u64>> for OffsetIndex {
    fn from(offsets: Vec<u64>) -> Self {
        Self { offsets }
    }
}

// =============================================================================
// IndexState
// =============================================================================

/// Outcome of attempting to load an index at corpus open time.
///
/// A corpus handle is constructed in exactly one of these states and never
/// transitions between them.
#[derive(Debug, Clone)]
pub enum IndexState {
    /// Index loaded; random access available
    Loaded(OffsetIndex),

    /// No usable index; the corpus supports sequential iteration only
    Absent,
}

impl IndexState {
    /// Attempt to load the index at `path`, absorbing every failure.
    ///
    /// A missing, truncated, corrupt, or version-mismatched index file all
    /// collapse to `Absent` — logged once here, at debug level, and never
    /// surfaced to the caller. An absent index is a degraded mode, not an
    /// error.
    pub fn load(path: &Path, verify_checksum: bool) -> Self {
        match OffsetIndex::load(path, verify_checksum) {
            Ok(index) => {
                tracing::info!(
                    "loaded corpus index from {} ({} documents)",
                    path.display(),
                    index.len()
                );
                IndexState::Loaded(index)
            }
            Err(e) => {
                tracing::debug!(
                    "no usable index at {} ({}); random access disabled",
                    path.display(),
                    e
                );
                IndexState::Absent
            }
        }
    }

    /// Whether random access is available
    pub fn is_loaded(&self) -> bool {
        matches!(self, IndexState::Loaded(_))
    }
}
