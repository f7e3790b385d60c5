//! Record Iterator
//!
//! Sequential iteration over all records in a corpus storage file written
//! by `RecordSerializer`, in document (docno) order.
//!
//! This is the fast path: one buffered forward pass, no seeks. Prefer it
//! over repeated offset lookups whenever the whole corpus is wanted.

use std::fs::File;
use std::io::BufReader;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Result;

use super::records::read_record;

/// Iterator over the documents of a record-format storage file
pub struct RecordIter<D> {
    file: BufReader<File>,
    /// Total file size; iteration stops here
    end_offset: u64,
    /// Current position in file
    current_offset: u64,
    _doc: PhantomData<fn() -> D>,
}

impl<D> RecordIter<D> {
    /// Open a storage file for sequential reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let end_offset = file.metadata()?.len();
        Ok(Self {
            file: BufReader::new(file),
            end_offset,
            current_offset: 0,
            _doc: PhantomData,
        })
    }
}

impl<D> Iterator for RecordIter<D>
where
    D: DeserializeOwned,
{
    type Item = Result<D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_offset >= self.end_offset {
            return None;
        }

        match read_record(&mut self.file, self.end_offset - self.current_offset) {
            Ok((document, record_size)) => {
                self.current_offset += record_size;
                Some(Ok(document))
            }
            Err(e) => {
                // Poison the iterator; a torn or corrupt record means the
                // rest of the file cannot be framed reliably.
                self.current_offset = self.end_offset;
                Some(Err(e))
            }
        }
    }
}
