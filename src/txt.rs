//! Streaming reader for the vendor TXT mnemonic export dialect: records
//! are separated by `*** DOCUMENT BOUNDARY ***` marker lines, and each
//! remaining line encodes one field.

use crate::boundary::{BoundaryMatcher, ChunkReader};
use crate::error::Result;
use crate::field::{is_control_tag, Field};
use crate::formats::RecordSource;
use crate::leader::Leader;
use crate::record::Record;
use std::io::BufRead;

fn boundary_matcher() -> BoundaryMatcher {
    BoundaryMatcher::new(&["*** DOCUMENT BOUNDARY ***"])
}

/// Streaming TXT mnemonic dialect reader.
#[derive(Debug)]
pub struct TxtReader<R: BufRead> {
    chunks: ChunkReader<R>,
    records_read: usize,
}

impl<R: BufRead> TxtReader<R> {
    /// Wrap a line-oriented reader over TXT export text.
    pub fn new(reader: R) -> Self {
        Self {
            chunks: ChunkReader::new(reader, boundary_matcher()),
            records_read: 0,
        }
    }

    /// Read the next record, or `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying stream fails; lines that
    /// don't parse into a field are skipped, never fatal.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        let chunk = match self.chunks.next_chunk()? {
            Some(c) => c,
            None => return Ok(None),
        };

        let mut record = Record::new(Leader::default());
        for line in chunk.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(field) = parse_line(line) {
                record.add_ordered_field(field);
            }
        }

        self.records_read += 1;
        Ok(Some(record))
    }
}

fn parse_line(line: &str) -> Option<Field> {
    if line.contains("FORM=") {
        let value = line.splitn(2, '=').nth(1).unwrap_or("").to_string();
        let mut field = Field::data("FMT", ' ', ' ');
        field.push_subfield_raw('a', value);
        return Some(field);
    }

    let chars: Vec<char> = line.chars().collect();
    if chars.len() < 4 {
        return None;
    }
    let tag: String = chars[1..4].iter().collect();

    if is_control_tag(&tag) {
        let data = line
            .find("|a")
            .map(|i| line[i + 2..].to_string())
            .unwrap_or_else(|| line.trim().to_string());
        return Some(Field::control(tag, data));
    }

    let ind1 = chars.get(6).copied().unwrap_or(' ');
    let ind2 = chars.get(7).copied().unwrap_or(' ');
    let mut field = Field::data(tag, ind1, ind2);

    let rest: String = chars.get(8..).map_or_else(String::new, |s| s.iter().collect());
    let mut parts = rest.split('|');
    parts.next(); // first fragment is ignored
    for part in parts {
        let mut pc = part.chars();
        if let Some(code) = pc.next() {
            let value: String = pc.collect();
            field.push_subfield_raw(code, value);
        }
    }
    Some(field)
}

impl<R: BufRead + std::fmt::Debug> RecordSource for TxtReader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        TxtReader::read_record(self)
    }

    fn records_read(&self) -> Option<usize> {
        Some(self.records_read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn s4_three_records_by_three_boundaries() {
        let input = concat!(
            "*** DOCUMENT BOUNDARY ***\n",
            "=001  |aocm1\n",
            "*** DOCUMENT BOUNDARY ***\n",
            "=001  |aocm2\n",
            "*** DOCUMENT BOUNDARY ***\n",
            "=001  |aocm3\n",
        );
        let mut reader = TxtReader::new(Cursor::new(input));
        let mut count = 0;
        while reader.read_record().unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn form_line_yields_fmt_field() {
        let input = "FORM=BK\n";
        let mut reader = TxtReader::new(Cursor::new(input));
        let record = reader.read_record().unwrap().unwrap();
        match record.first("FMT").unwrap() {
            Field::Data { subfields, .. } => assert_eq!(subfields[0].value, "BK"),
            Field::Control { .. } => panic!("expected data field"),
        }
    }

    #[test]
    fn control_field_line_extracts_after_pipe_a() {
        let input = "=001  |aocm12345\n";
        let mut reader = TxtReader::new(Cursor::new(input));
        let record = reader.read_record().unwrap().unwrap();
        match record.first("001").unwrap() {
            Field::Control { data, .. } => assert_eq!(data, "ocm12345"),
            Field::Data { .. } => panic!("expected control field"),
        }
    }

    #[test]
    fn data_field_line_extracts_indicators_and_subfields() {
        let input = "=245  10|aTitle|csubtitle\n";
        let mut reader = TxtReader::new(Cursor::new(input));
        let record = reader.read_record().unwrap().unwrap();
        match record.first("245").unwrap() {
            Field::Data { ind1, ind2, subfields, .. } => {
                assert_eq!(*ind1, '1');
                assert_eq!(*ind2, '0');
                assert_eq!(subfields[0].value, "Title");
                assert_eq!(subfields[1].value, "subtitle");
            }
            Field::Control { .. } => panic!("expected data field"),
        }
    }
}
