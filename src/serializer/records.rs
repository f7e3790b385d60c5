//! Record Serializer
//!
//! Built-in corpus format: an append-only file of framed bincode records,
//! one per document, with a CRC32 per record for corruption detection.
//!
//! ## Record Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Record 1                                │
//! │ ┌─────────┬─────────┬─────────────────┐ │
//! │ │ CRC (4) │ Len (4) │ bincode payload │ │
//! │ └─────────┴─────────┴─────────────────┘ │
//! ├─────────────────────────────────────────┤
//! │ Record 2                                │
//! │   ...                                   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Because the writer is append-only, the reported offsets are strictly
//! increasing, each pointing at the CRC field of its record.

use std::fs::OpenOptions;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::DocdexError;

use super::CorpusSerializer;

/// Record frame overhead: CRC (4) + Len (4)
pub(super) const FRAME_HEADER_SIZE: u64 = 8;

/// Corpus serializer for framed bincode records.
///
/// Works for any serde-serializable document type; the type is fixed per
/// serializer value via the phantom parameter.
#[derive(Debug)]
pub struct RecordSerializer<D> {
    _doc: PhantomData<fn() -> D>,
}

impl<D> RecordSerializer<D> {
    pub fn new() -> Self {
        Self { _doc: PhantomData }
    }
}

impl<D> Default for RecordSerializer<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for RecordSerializer<D> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// Read and decode one record frame starting at the stream's current
/// position. Shared by offset lookup and sequential iteration.
///
/// `remaining` is the byte count from the current position to the end of
/// storage; the length field is untrusted, so a record claiming more than
/// that is rejected before any payload allocation.
pub(super) fn read_record<R, D>(storage: &mut R, remaining: u64) -> Result<(D, u64)>
where
    R: Read,
    D: DeserializeOwned,
{
    let mut header = [0u8; FRAME_HEADER_SIZE as usize];
    storage.read_exact(&mut header)?;

    let stored_crc = u32::from_le_bytes(header[0..4].try_into().unwrap());
    let len = u32::from_le_bytes(header[4..8].try_into().unwrap()) as usize;

    if FRAME_HEADER_SIZE + len as u64 > remaining {
        return Err(DocdexError::Storage(format!(
            "record length {} exceeds remaining storage ({} bytes)",
            len,
            remaining.saturating_sub(FRAME_HEADER_SIZE)
        )));
    }

    let mut payload = vec![0u8; len];
    storage.read_exact(&mut payload)?;

    let actual_crc = crc32fast::hash(&payload);
    if actual_crc != stored_crc {
        return Err(DocdexError::Storage(format!(
            "record checksum mismatch: stored {:08x}, computed {:08x}",
            stored_crc, actual_crc
        )));
    }

    let document = bincode::deserialize(&payload)
        .map_err(|e| DocdexError::Serialization(format!("record decode failed: {}", e)))?;

    Ok((document, FRAME_HEADER_SIZE + len as u64))
}

impl<D> CorpusSerializer for RecordSerializer<D>
where
    D: Serialize + DeserializeOwned,
{
    type Document = D;

    fn write_corpus<I>(&self, path: &Path, documents: I) -> Result<Option<Vec<u64>>>
    where
        I: IntoIterator<Item = D>,
    {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::new(file);
        let mut offsets = Vec::new();
        let mut current_offset: u64 = 0;

        for document in documents {
            let payload = bincode::serialize(&document).map_err(|e| {
                DocdexError::Serialization(format!("record encode failed: {}", e))
            })?;
            if payload.len() > u32::MAX as usize {
                return Err(DocdexError::Storage(format!(
                    "document of {} bytes exceeds record size limit",
                    payload.len()
                )));
            }

            // Record starts at the CRC field
            offsets.push(current_offset);

            let crc = crc32fast::hash(&payload);
            writer.write_all(&crc.to_le_bytes())?;
            writer.write_all(&(payload.len() as u32).to_le_bytes())?;
            writer.write_all(&payload)?;

            current_offset += FRAME_HEADER_SIZE + payload.len() as u64;
        }

        writer.flush()?;
        let file = writer.into_inner().map_err(|e| {
            DocdexError::Storage(format!("failed to flush corpus storage: {}", e))
        })?;
        file.sync_all()?;

        tracing::debug!(
            "wrote {} records ({} bytes) to {}",
            offsets.len(),
            current_offset,
            path.display()
        );

        Ok(Some(offsets))
    }

    fn decode_at_offset<R>(&self, storage: &mut R, offset: u64) -> Result<D>
    where
        R: Read + Seek,
    {
        let end = storage.seek(SeekFrom::End(0))?;
        storage.seek(SeekFrom::Start(offset))?;
        let (document, _) = read_record(storage, end.saturating_sub(offset))?;
        Ok(document)
    }
}
