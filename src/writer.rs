//! Writing records to a binary (ISO 2709) byte stream.
//!
//! [`MarcWriter`] appends `record.as_binary()` to the output for every
//! call; it owns its underlying writer for the lifetime of writing.
//! Writing after [`MarcWriter::finish`] is an error.
//!
//! # Examples
//!
//! ```
//! use marc_interchange::{MarcWriter, Record, Field, Leader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut buffer = Vec::new();
//! {
//!     let mut writer = MarcWriter::new(&mut buffer);
//!     let mut record = Record::new(Leader::default());
//!     let mut field = Field::data("245", '1', '0');
//!     field.add_subfield('a', "Title");
//!     record.add_field(field);
//!     writer.write_record(&record)?;
//!     writer.finish()?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{MarcError, Result};
use crate::formats::RecordSink;
use crate::record::Record;
use std::io::Write;

/// Writer for the binary (ISO 2709) record format.
#[derive(Debug)]
pub struct MarcWriter<W: Write> {
    writer: W,
    records_written: usize,
    finished: bool,
}

impl<W: Write> MarcWriter<W> {
    /// Wrap a writable byte stream.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
            finished: false,
        }
    }

    /// Encode `record` and append it to the output.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::RecordWriting`] if the writer has already
    /// been finished, or any error the encoder raises.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        if self.finished {
            return Err(MarcError::RecordWriting(
                "cannot write to a finished writer".to_string(),
            ));
        }
        let bytes = record.as_binary()?;
        self.writer.write_all(&bytes)?;
        self.records_written += 1;
        Ok(())
    }

    /// Write every record in `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if any record fails to write.
    pub fn write_batch(&mut self, records: &[Record]) -> Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flush the underlying writer and mark this writer finished.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }

    /// Number of records written so far.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }
}

impl<W: Write + std::fmt::Debug> RecordSink for MarcWriter<W> {
    fn write_record(&mut self, record: &Record) -> Result<()> {
        MarcWriter::write_record(self, record)
    }

    fn finish(&mut self) -> Result<()> {
        MarcWriter::finish(self)
    }

    fn records_written(&self) -> Option<usize> {
        Some(self.records_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::leader::Leader;

    #[test]
    fn write_record_then_finish() {
        let mut record = Record::new(Leader::default());
        let mut field = Field::data("245", '1', '0');
        field.add_subfield('a', "Test title");
        record.add_field(field);

        let mut buffer = Vec::new();
        let mut writer = MarcWriter::new(&mut buffer);
        writer.write_record(&record).unwrap();
        assert_eq!(writer.records_written(), 1);
        writer.finish().unwrap();
        assert!(buffer.len() > 24);
    }

    #[test]
    fn cannot_write_after_finish() {
        let record = Record::new(Leader::default());
        let mut buffer = Vec::new();
        let mut writer = MarcWriter::new(&mut buffer);
        writer.finish().unwrap();
        assert!(writer.write_record(&record).is_err());
    }

    #[test]
    fn write_batch_writes_every_record() {
        let records: Vec<Record> = (0..3)
            .map(|i| {
                let mut record = Record::new(Leader::default());
                record.add_field(Field::control("001", format!("id{i}")));
                record
            })
            .collect();

        let mut buffer = Vec::new();
        let mut writer = MarcWriter::new(&mut buffer);
        writer.write_batch(&records).unwrap();
        assert_eq!(writer.records_written(), 3);
        writer.finish().unwrap();
    }
}
