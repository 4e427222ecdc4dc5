//! Reading records from a binary (ISO 2709) byte stream.
//!
//! [`MarcReader`] owns its underlying reader for the lifetime of
//! iteration; iteration is not restartable, and there is no random
//! access into the stream.
//!
//! # Examples
//!
//! ```no_run
//! use marc_interchange::MarcReader;
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("records.mrc")?;
//! let mut reader = MarcReader::new(file);
//!
//! while let Some(record) = reader.read_record()? {
//!     println!("got a record with {} fields", record.all_fields().len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::binary;
use crate::error::Result;
use crate::formats::RecordSource;
use crate::record::Record;
use std::io::Read;

/// Reader for the binary (ISO 2709) record format.
#[derive(Debug)]
pub struct MarcReader<R: Read> {
    reader: R,
    records_read: usize,
}

impl<R: Read> MarcReader<R> {
    /// Wrap a readable byte stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            records_read: 0,
        }
    }

    /// Read the next record from the stream.
    ///
    /// Returns `Ok(None)` once the stream is exhausted (no partial
    /// trailing bytes). The first five bytes of each record give its
    /// total length; that many bytes (minus the five already consumed)
    /// are read before decoding.
    ///
    /// # Errors
    ///
    /// Returns any of the binary decoder's structural error kinds, or an
    /// I/O error from the underlying stream.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        let mut length_buf = [0u8; 5];
        match read_exact_or_eof(&mut self.reader, &mut length_buf)? {
            FillResult::Eof => return Ok(None),
            FillResult::Filled => {}
        }

        let length_str = std::str::from_utf8(&length_buf).map_err(|e| {
            crate::error::MarcError::RecordLength(format!("length header is not ASCII: {e}"))
        })?;
        let record_length: usize = length_str.parse().map_err(|_| {
            crate::error::MarcError::RecordLength(format!(
                "unparsable record length: {length_str:?}"
            ))
        })?;

        let remaining = record_length.saturating_sub(5);
        let mut rest = vec![0u8; remaining];
        self.reader.read_exact(&mut rest)?;

        let mut full = Vec::with_capacity(record_length);
        full.extend_from_slice(&length_buf);
        full.extend_from_slice(&rest);

        let record = binary::decode(&full)?;
        self.records_read += 1;
        Ok(Some(record))
    }

    /// Read all remaining records into a vector.
    ///
    /// # Errors
    ///
    /// Returns an error if any record fails to decode.
    pub fn read_all(&mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Number of records successfully read so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }
}

impl<R: Read + std::fmt::Debug> RecordSource for MarcReader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        MarcReader::read_record(self)
    }

    fn records_read(&self) -> Option<usize> {
        Some(self.records_read)
    }
}

enum FillResult {
    Eof,
    Filled,
}

/// Like `Read::read_exact`, but treats zero bytes read as a clean EOF
/// rather than an error (the common case between records), while any
/// partial-then-truncated read still surfaces as an I/O error.
fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<FillResult> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..])? {
            0 if total == 0 => return Ok(FillResult::Eof),
            0 => {
                return Err(crate::error::MarcError::RecordLength(
                    "stream ended mid-header".to_string(),
                ))
            }
            n => total += n,
        }
    }
    Ok(FillResult::Filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::leader::Leader;
    use crate::writer::MarcWriter;
    use std::io::Cursor;

    #[test]
    fn reads_records_written_by_the_writer() {
        let mut record = Record::new(Leader::default());
        record.add_field(Field::control("001", "12345"));
        let mut field = Field::data("245", '1', '0');
        field.add_subfield('a', "Test title");
        record.add_field(field);

        let mut buffer = Vec::new();
        {
            let mut writer = MarcWriter::new(&mut buffer);
            writer.write_record(&record).unwrap();
            writer.finish().unwrap();
        }

        let mut reader = MarcReader::new(Cursor::new(buffer));
        let read = reader.read_record().unwrap().unwrap();
        assert_eq!(read.identifier(), Some("12345".to_string()));
        assert!(reader.read_record().unwrap().is_none());
        assert_eq!(reader.records_read(), 1);
    }

    #[test]
    fn empty_stream_yields_no_records() {
        let mut reader = MarcReader::new(Cursor::new(Vec::new()));
        assert!(reader.read_record().unwrap().is_none());
    }

    #[test]
    fn multiple_records_stream_sequentially() {
        let mut buffer = Vec::new();
        {
            let mut writer = MarcWriter::new(&mut buffer);
            for i in 0..3 {
                let mut record = Record::new(Leader::default());
                record.add_field(Field::control("001", format!("id{i}")));
                writer.write_record(&record).unwrap();
            }
            writer.finish().unwrap();
        }

        let mut reader = MarcReader::new(Cursor::new(buffer));
        let records = reader.read_all().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].identifier(), Some("id1".to_string()));
    }
}
